//! # pubmed-papers
//!
//! Fetch PubMed papers for a query and flag authors with non-academic
//! (commercial) affiliations.
//!
//! ## Modules
//!
//! - [`affiliation`] - Keyword heuristic for company vs. academic affiliations
//! - [`email`] - Corresponding-author email extraction
//! - [`record`] - Raw article metadata and the normalized output record
//! - [`pubmed`] - E-utilities client (esearch + efetch)
//! - [`pipeline`] - Search, fetch and record building for one query
//! - [`output`] - CSV and console sinks
//! - [`config`] - Endpoint and limit configuration
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pubmed_papers::{pipeline, Config, PubmedClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PubmedClient::new(Config::default())?;
//!     let records = pipeline::fetch_and_process_papers(&client, "cancer immunotherapy").await?;
//!     println!("Found {} records", records.len());
//!     Ok(())
//! }
//! ```

pub mod affiliation;
pub mod config;
pub mod email;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod pubmed;
pub mod record;

pub use config::Config;
pub use error::{PapersError, Result};
pub use pubmed::PubmedClient;
pub use record::{build_record, Author, RawArticle, Record};
