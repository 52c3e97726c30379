//! Request-level API: document + query (+ optional configuration) in,
//! match locations out.

use std::sync::Arc;

use tracing::debug;
use tsx_error::Result;
use tsx_headline::{ConfigRef, HeadlineOptions, TextSearchCatalog, annotate};
use tsx_types::{TsQuery, WordEntry};

use crate::collect::{MatchTable, collect_matches};
use crate::config::ExtractorConfig;
use crate::locate::MatchStream;

/// Locates query matches in documents.
///
/// Every request resolves its configuration once, annotates the document
/// once, and then extracts from the annotated sequence it owns. Requests
/// share nothing but the catalog.
#[derive(Debug, Clone)]
pub struct MatchLocator {
    catalog: Arc<TextSearchCatalog>,
    extractor: ExtractorConfig,
    headline: HeadlineOptions,
}

impl MatchLocator {
    #[must_use]
    pub fn new(catalog: Arc<TextSearchCatalog>) -> Self {
        Self {
            catalog,
            extractor: ExtractorConfig::default(),
            headline: HeadlineOptions::default(),
        }
    }

    #[must_use]
    pub fn with_extractor_config(mut self, extractor: ExtractorConfig) -> Self {
        self.extractor = extractor;
        self
    }

    #[must_use]
    pub fn with_headline_options(mut self, headline: HeadlineOptions) -> Self {
        self.headline = headline;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<TextSearchCatalog> {
        &self.catalog
    }

    #[must_use]
    pub const fn extractor_config(&self) -> &ExtractorConfig {
        &self.extractor
    }

    /// Resolve the configuration and annotate `document` against `query`.
    ///
    /// `config: None` uses the catalog's current default.
    pub fn annotate(
        &self,
        document: &str,
        query: &TsQuery,
        config: Option<&ConfigRef>,
    ) -> Result<Vec<WordEntry>> {
        let resolved = self.catalog.resolve(config)?;
        annotate(&resolved, document, query, &self.headline)
    }

    /// Start a resumable extraction over `document`.
    pub fn stream(
        &self,
        document: &str,
        query: &TsQuery,
        config: Option<&ConfigRef>,
    ) -> Result<MatchStream> {
        let words = self.annotate(document, query, config)?;
        MatchStream::new(words, self.extractor.policy())
    }

    /// Extract every match at once.
    pub fn locate(
        &self,
        document: &str,
        query: &TsQuery,
        config: Option<&ConfigRef>,
    ) -> Result<MatchTable> {
        let words = self.annotate(document, query, config)?;
        let rows = collect_matches(&words, &self.extractor)?;
        debug!(matches = rows.len(), %query, "matches located");
        Ok(MatchTable::new(rows))
    }
}
