//! Query pipeline: search -> batch fetch -> record building.

use crate::error::{PapersError, Result};
use crate::pubmed::PubmedClient;
use crate::record::{build_record, Record};
use tracing::{debug, info};

/// Run one query end to end and return its records in search order.
///
/// Zero matches is `Ok(vec![])`; any transport or decoding failure in either
/// request aborts the whole run with `Err`, so no partial list is returned.
pub async fn fetch_and_process_papers(
    client: &PubmedClient,
    query: &str,
) -> Result<Vec<Record>> {
    if query.trim().is_empty() {
        return Err(PapersError::Validation("query must not be empty".to_string()));
    }

    debug!(query = query, "Fetching PubMed IDs for query");
    let ids = client.search_ids(query).await?;

    if ids.is_empty() {
        info!(query = query, "No papers matched");
        return Ok(Vec::new());
    }

    debug!(found = ids.len(), "Found papers. Fetching full details...");
    let articles = client.fetch_articles(&ids).await?;

    let records: Vec<Record> = articles.iter().map(build_record).collect();

    let flagged = records
        .iter()
        .filter(|r| !r.non_academic_authors().is_empty())
        .count();
    info!(
        total = records.len(),
        with_non_academic = flagged,
        "Built records"
    );

    Ok(records)
}
