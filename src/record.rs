//! Article metadata and the normalized output record.
//!
//! [`RawArticle`] is what the fetch step decodes for one PubMed article;
//! [`Record`] is the flattened row derived from it by [`build_record`].

use crate::affiliation::is_non_academic;
use crate::email::extract_email;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Publication year used when the article has none
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Email value used when no affiliation contains an address
pub const NO_EMAIL: &str = "N/A";

/// Separator for the author and company lists
pub const LIST_SEPARATOR: &str = "; ";

/// Output column order, shared by the CSV header and console printer
pub const RECORD_COLUMNS: &[&str] = &[
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// One author entry as listed in the article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub fore_name: String,
    pub last_name: String,
    /// First affiliation listed for the author, empty when none
    pub affiliation: String,
}

impl Author {
    pub fn new(
        fore_name: impl Into<String>,
        last_name: impl Into<String>,
        affiliation: impl Into<String>,
    ) -> Self {
        Self {
            fore_name: fore_name.into(),
            last_name: last_name.into(),
            affiliation: affiliation.into(),
        }
    }

    /// Forename and last name joined by a space, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fore_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Raw metadata for one fetched article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArticle {
    pub pmid: String,
    pub title: Option<String>,
    pub pub_year: String,
    /// Authors in document order
    pub authors: Vec<Author>,
}

impl Default for RawArticle {
    fn default() -> Self {
        Self {
            pmid: String::new(),
            title: None,
            pub_year: UNKNOWN_YEAR.to_string(),
            authors: Vec::new(),
        }
    }
}

/// Normalized output row for one article.
///
/// `non_academic_authors` and `company_affiliations` always have the same
/// length; entry `i` of both refers to the same author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pmid: String,
    title: Option<String>,
    publication_date: String,
    non_academic_authors: Vec<String>,
    company_affiliations: Vec<String>,
    email: String,
}

impl Record {
    /// Build the record for one article.
    pub fn from_article(article: &RawArticle) -> Self {
        let mut non_academic_authors = Vec::new();
        let mut company_affiliations = Vec::new();
        let mut email: Option<&str> = None;

        for author in &article.authors {
            let affiliation = author.affiliation.as_str();

            if is_non_academic(affiliation) {
                non_academic_authors.push(author.full_name());
                company_affiliations.push(affiliation.to_string());
            }

            if email.is_none() && affiliation.contains('@') {
                email = extract_email(affiliation);
            }
        }

        let publication_date = if article.pub_year.trim().is_empty() {
            UNKNOWN_YEAR.to_string()
        } else {
            article.pub_year.clone()
        };

        Self {
            pmid: article.pmid.clone(),
            title: article.title.clone(),
            publication_date,
            non_academic_authors,
            company_affiliations,
            email: email.unwrap_or(NO_EMAIL).to_string(),
        }
    }

    pub fn pmid(&self) -> &str {
        &self.pmid
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn publication_date(&self) -> &str {
        &self.publication_date
    }

    pub fn non_academic_authors(&self) -> &[String] {
        &self.non_academic_authors
    }

    pub fn company_affiliations(&self) -> &[String] {
        &self.company_affiliations
    }

    /// Corresponding author email, or `"N/A"`
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Non-academic authors joined with `"; "`
    pub fn joined_authors(&self) -> String {
        self.non_academic_authors.join(LIST_SEPARATOR)
    }

    /// Company affiliations joined with `"; "`
    pub fn joined_affiliations(&self) -> String {
        self.company_affiliations.join(LIST_SEPARATOR)
    }

    /// `(column, value)` pairs in [`RECORD_COLUMNS`] order, for console output.
    pub fn fields(&self) -> [(&'static str, String); 6] {
        [
            (RECORD_COLUMNS[0], self.pmid.clone()),
            (
                RECORD_COLUMNS[1],
                self.title.clone().unwrap_or_else(|| "None".to_string()),
            ),
            (RECORD_COLUMNS[2], self.publication_date.clone()),
            (RECORD_COLUMNS[3], self.joined_authors()),
            (RECORD_COLUMNS[4], self.joined_affiliations()),
            (RECORD_COLUMNS[5], self.email.clone()),
        ]
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Record", RECORD_COLUMNS.len())?;
        state.serialize_field("PubmedID", &self.pmid)?;
        state.serialize_field("Title", &self.title)?;
        state.serialize_field("Publication Date", &self.publication_date)?;
        state.serialize_field("Non-academic Author(s)", &self.joined_authors())?;
        state.serialize_field("Company Affiliation(s)", &self.joined_affiliations())?;
        state.serialize_field("Corresponding Author Email", &self.email)?;
        state.end()
    }
}

/// Build one [`Record`] from one [`RawArticle`].
pub fn build_record(article: &RawArticle) -> Record {
    Record::from_article(article)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(authors: Vec<Author>) -> RawArticle {
        RawArticle {
            pmid: "12345".to_string(),
            title: Some("A study".to_string()),
            pub_year: "2023".to_string(),
            authors,
        }
    }

    #[test]
    fn test_company_author_with_email() {
        let record = build_record(&article(vec![Author::new(
            "Alice",
            "Brown",
            "XYZ Pharma Inc, contact: a.b@xyzpharma.com",
        )]));

        assert_eq!(record.non_academic_authors(), ["Alice Brown"]);
        assert_eq!(
            record.company_affiliations(),
            ["XYZ Pharma Inc, contact: a.b@xyzpharma.com"]
        );
        assert_eq!(record.email(), "a.b@xyzpharma.com");
        assert_eq!(record.pmid(), "12345");
        assert_eq!(record.title(), Some("A study"));
        assert_eq!(record.publication_date(), "2023");
    }

    #[test]
    fn test_academic_author_only() {
        let record = build_record(&article(vec![Author::new(
            "Bob",
            "Smith",
            "Dept of Biology, Stanford University",
        )]));

        assert!(record.non_academic_authors().is_empty());
        assert!(record.company_affiliations().is_empty());
        assert_eq!(record.joined_authors(), "");
        assert_eq!(record.joined_affiliations(), "");
        assert_eq!(record.email(), NO_EMAIL);
    }

    #[test]
    fn test_empty_name_is_kept() {
        let record = build_record(&article(vec![
            Author::new("", "", "Acme Biotech Ltd"),
            Author::new("  Carol ", "", "Beta Labs"),
        ]));

        assert_eq!(record.non_academic_authors(), ["", "Carol"]);
        assert_eq!(record.company_affiliations().len(), 2);
        assert_eq!(record.joined_authors(), "; Carol");
        assert_eq!(record.joined_affiliations(), "Acme Biotech Ltd; Beta Labs");
    }

    #[test]
    fn test_lists_stay_aligned() {
        let affiliations = [
            "Gamma Therapeutics",
            "Harvard University",
            "",
            "Delta Genomics; Oxford College",
            "Epsilon Pharma",
        ];
        let authors = affiliations
            .iter()
            .enumerate()
            .map(|(i, aff)| Author::new(format!("F{i}"), format!("L{i}"), *aff))
            .collect();

        let record = build_record(&article(authors));

        assert_eq!(
            record.non_academic_authors().len(),
            record.company_affiliations().len()
        );
        assert_eq!(record.non_academic_authors(), ["F0 L0", "F4 L4"]);
        assert_eq!(
            record.company_affiliations(),
            ["Gamma Therapeutics", "Epsilon Pharma"]
        );
    }

    #[test]
    fn test_first_email_in_author_order_wins() {
        let record = build_record(&article(vec![
            Author::new("A", "One", "Stanford University, first@stanford.edu"),
            Author::new("B", "Two", "XYZ Pharma Inc, second@xyz.com"),
        ]));

        // academic authors still provide the corresponding email
        assert_eq!(record.email(), "first@stanford.edu");
        assert_eq!(record.non_academic_authors(), ["B Two"]);
    }

    #[test]
    fn test_failed_extraction_keeps_searching() {
        let record = build_record(&article(vec![
            Author::new("A", "One", "Reach us @ the front desk"),
            Author::new("B", "Two", "Mail: b.two@lab.org"),
        ]));

        assert_eq!(record.email(), "b.two@lab.org");
    }

    #[test]
    fn test_missing_fields_default() {
        let raw = RawArticle {
            pmid: "999".to_string(),
            title: None,
            pub_year: String::new(),
            authors: Vec::new(),
        };
        let record = build_record(&raw);

        assert_eq!(record.title(), None);
        assert_eq!(record.publication_date(), UNKNOWN_YEAR);
        assert_eq!(record.email(), NO_EMAIL);
        assert_eq!(RawArticle::default().pub_year, UNKNOWN_YEAR);
    }

    #[test]
    fn test_fields_order() {
        let record = build_record(&RawArticle {
            pmid: "1".to_string(),
            ..Default::default()
        });
        let fields = record.fields();

        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, RECORD_COLUMNS);
        assert_eq!(fields[1].1, "None");
        assert_eq!(fields[2].1, UNKNOWN_YEAR);
    }
}
