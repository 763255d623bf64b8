//! Heuristic classification of author affiliations.
//!
//! An affiliation is non-academic when it names at least one company keyword
//! and no academic keyword. Matching is a case-insensitive substring test, so
//! `"inc"` also matches inside `"Princeton"`; academic keywords always win.

/// Keywords marking an institutional (academic or clinical) affiliation
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "institute",
    "college",
    "hospital",
    "school",
];

/// Keywords marking a commercial affiliation
pub const COMPANY_KEYWORDS: &[&str] = &[
    "inc",
    "ltd",
    "pharma",
    "biotech",
    "therapeutics",
    "labs",
    "genomics",
];

/// Returns `true` if the affiliation looks commercial rather than academic.
///
/// Empty or keyword-free affiliations are treated as academic.
pub fn is_non_academic(affiliation: &str) -> bool {
    let lower = affiliation.to_lowercase();

    let has_company = COMPANY_KEYWORDS.iter().any(|kw| lower.contains(kw));
    let has_academic = ACADEMIC_KEYWORDS.iter().any(|kw| lower.contains(kw));

    has_company && !has_academic
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_only() {
        assert!(is_non_academic("XYZ Pharma Inc, Boston, MA"));
        assert!(is_non_academic("Acme Genomics Ltd."));
        assert!(is_non_academic("GENENTECH THERAPEUTICS"));
    }

    #[test]
    fn test_academic_takes_precedence() {
        assert!(!is_non_academic("Harvard University and Moderna Therapeutics"));
        assert!(!is_non_academic("Broad Institute, Biotech Division"));
        assert!(!is_non_academic("pharma school of medicine"));
    }

    #[test]
    fn test_academic_only_or_neither() {
        assert!(!is_non_academic("Dept of Biology, Stanford University"));
        assert!(!is_non_academic("Mayo Clinic Hospital"));
        assert!(!is_non_academic("Department of Chemistry, Berlin"));
        assert!(!is_non_academic(""));
    }

    #[test]
    fn test_substring_matching() {
        // "inc" inside a city name still counts
        assert!(is_non_academic("Princeton, NJ"));
        // ...unless an academic keyword is also present
        assert!(!is_non_academic("Princeton University"));
    }

    #[test]
    fn test_every_keyword_pairing() {
        for company in COMPANY_KEYWORDS {
            assert!(is_non_academic(company), "{company} alone");
            for academic in ACADEMIC_KEYWORDS {
                let text = format!("{} {}", company.to_uppercase(), academic);
                assert!(!is_non_academic(&text), "{text}");
            }
        }
    }
}
