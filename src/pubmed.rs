//! PubMed E-utilities client.
//!
//! Two requests per query:
//! - `esearch` (JSON) resolves a search term to an ordered list of PMIDs
//! - `efetch` (XML) returns metadata for all PMIDs in one batch
//!
//! The XML is read with a streaming `quick-xml` reader and only the fields the
//! record builder needs are kept.

use crate::config::Config;
use crate::error::{OptionExt, PapersError, Result};
use crate::record::{Author, RawArticle, UNKNOWN_YEAR};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Database selector sent with both requests
const DATABASE: &str = "pubmed";

/// HTTP client for the search and fetch endpoints
#[derive(Debug, Clone)]
pub struct PubmedClient {
    client: Client,
    config: Config,
}

impl PubmedClient {
    /// Create a new client from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("pubmed-papers/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PapersError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Resolve a query to at most `max_results` PMIDs, in search order.
    pub async fn search_ids(&self, query: &str) -> Result<Vec<String>> {
        let retmax = self.config.max_results.to_string();
        let mut params = vec![
            ("db", DATABASE),
            ("term", query),
            ("retmode", "json"),
            ("retmax", retmax.as_str()),
        ];
        if let Some(key) = self.config.api_key.as_deref() {
            params.push(("api_key", key));
        }

        let body = self.get_text(&self.config.search_endpoint, &params).await?;
        let ids = parse_search_response(&body)?;

        info!(query = query, found = ids.len(), "Search complete");
        Ok(ids)
    }

    /// Fetch metadata for all `ids` in a single request.
    pub async fn fetch_articles(&self, ids: &[String]) -> Result<Vec<RawArticle>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let mut params = vec![("db", DATABASE), ("id", joined.as_str()), ("retmode", "xml")];
        if let Some(key) = self.config.api_key.as_deref() {
            params.push(("api_key", key));
        }

        let body = self.get_text(&self.config.fetch_endpoint, &params).await?;
        let articles = parse_fetch_response(&body)?;

        info!(requested = ids.len(), parsed = articles.len(), "Fetch complete");
        Ok(articles)
    }

    async fn get_text(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String> {
        debug!(url = endpoint, "Sending request");

        let response = self.client.get(endpoint).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), url = endpoint, "E-utilities error");
            return Err(PapersError::Api {
                code: status.as_u16(),
                message: format!("{} returned {} - {}", endpoint, status, error_text),
            });
        }

        Ok(response.text().await?)
    }
}

// === esearch JSON ===

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: Option<ESearchResult>,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    idlist: Option<Vec<String>>,
}

/// Decode the `esearch` JSON body into its ID list.
pub fn parse_search_response(body: &str) -> Result<Vec<String>> {
    let response: ESearchResponse = serde_json::from_str(body)
        .map_err(|e| PapersError::Parse(format!("Failed to parse esearch response: {}", e)))?;

    response
        .esearchresult
        .and_then(|r| r.idlist)
        .ok_or_parse("esearch response has no esearchresult.idlist")
}

// === efetch XML ===

/// Decode a `PubmedArticleSet` document into raw articles, in document order.
pub fn parse_fetch_response(xml: &str) -> Result<Vec<RawArticle>> {
    let mut reader = Reader::from_str(xml);

    let mut articles = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"PubmedArticle" => {
                articles.push(parse_article(&mut reader)?);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(articles)
}

fn xml_error(e: impl std::fmt::Display) -> PapersError {
    PapersError::Parse(format!("Failed to parse efetch XML: {}", e))
}

/// Parse one `<PubmedArticle>`; the first PMID, title and dated PubDate win.
fn parse_article(reader: &mut Reader<&[u8]>) -> Result<RawArticle> {
    let mut pmid: Option<String> = None;
    let mut title: Option<String> = None;
    let mut year: Option<String> = None;
    let mut authors = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"PMID" if pmid.is_none() => pmid = Some(read_text(reader, b"PMID")?),
                b"ArticleTitle" if title.is_none() => {
                    title = Some(read_text(reader, b"ArticleTitle")?)
                }
                b"PubDate" if year.is_none() => year = parse_pub_year(reader)?,
                b"Author" => authors.push(parse_author(reader)?),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PubmedArticle" => break,
            Event::Eof => return Err(xml_error("unexpected end of document in PubmedArticle")),
            _ => {}
        }
        buf.clear();
    }

    Ok(RawArticle {
        pmid: pmid.unwrap_or_default(),
        title,
        pub_year: year
            .filter(|y| !y.is_empty())
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string()),
        authors,
    })
}

fn parse_pub_year(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    let mut year = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) if e.name().as_ref() == b"Year" => {
                year = Some(read_text(reader, b"Year")?);
            }
            Event::End(e) if e.name().as_ref() == b"PubDate" => break,
            Event::Eof => return Err(xml_error("unexpected end of document in PubDate")),
            _ => {}
        }
        buf.clear();
    }

    Ok(year)
}

/// Only the first `AffiliationInfo/Affiliation` of an author is kept.
fn parse_author(reader: &mut Reader<&[u8]>) -> Result<Author> {
    let mut author = Author::default();
    let mut affiliation: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"ForeName" => author.fore_name = read_text(reader, b"ForeName")?,
                b"LastName" => author.last_name = read_text(reader, b"LastName")?,
                b"AffiliationInfo" => {
                    let aff = parse_affiliation_info(reader)?;
                    if affiliation.is_none() {
                        affiliation = aff;
                    }
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"Author" => break,
            Event::Eof => return Err(xml_error("unexpected end of document in Author")),
            _ => {}
        }
        buf.clear();
    }

    author.affiliation = affiliation.unwrap_or_default();
    Ok(author)
}

fn parse_affiliation_info(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    let mut affiliation = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) if e.name().as_ref() == b"Affiliation" => {
                let text = read_text(reader, b"Affiliation")?;
                if affiliation.is_none() {
                    affiliation = Some(text);
                }
            }
            Event::End(e) if e.name().as_ref() == b"AffiliationInfo" => break,
            Event::Eof => return Err(xml_error("unexpected end of document in AffiliationInfo")),
            _ => {}
        }
        buf.clear();
    }

    Ok(affiliation)
}

/// Read the full text content of the current element, flattening nested
/// inline markup (`<i>`, `<sup>`, ...), up to its closing `end_tag`.
fn read_text(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Text(e) => text.push_str(&e.unescape().map_err(xml_error)?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e.into_inner())),
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.name().as_ref() == end_tag {
                    break;
                }
            }
            Event::Eof => return Err(xml_error("unexpected end of document in text element")),
            _ => {}
        }
        buf.clear();
    }

    Ok(text.trim().to_string())
}
