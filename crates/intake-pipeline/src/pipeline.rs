//! Pipeline construction and shared resources

use crate::notify::{LogNotifier, Notifier};
use crate::session::IntakeSession;
use intake_catalog::CatalogStore;
use intake_core::{Error, Result};
use intake_criteria::CollectorConfig;
use intake_ledger::ReservationLedger;
use intake_matcher::Matcher;
use std::sync::Arc;

/// Configuration for an intake pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Required-field set for the qualification stage
    pub collector: CollectorConfig,
}

/// Shared resources behind every intake session
///
/// Construct once per deployment and hand out sessions from it. Cloning is
/// cheap and all clones share the same catalog, ledger, and notifier.
///
/// # Example
///
/// ```no_run
/// use intake_catalog::InMemoryCatalog;
/// use intake_pipeline::IntakePipeline;
/// use std::sync::Arc;
///
/// # fn example() -> intake_core::Result<()> {
/// let pipeline = IntakePipeline::builder()
///     .catalog(Arc::new(InMemoryCatalog::new()))
///     .build()?;
///
/// let mut session = pipeline.session();
/// session.collect("category", "sedan")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct IntakePipeline {
    catalog: Arc<dyn CatalogStore>,
    matcher: Matcher,
    ledger: ReservationLedger,
    notifier: Arc<dyn Notifier>,
    config: PipelineConfig,
}

impl IntakePipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Start a fresh intake session
    pub fn session(&self) -> IntakeSession {
        IntakeSession::new(self.clone())
    }

    /// The catalog store this pipeline reads from
    pub fn catalog(&self) -> &Arc<dyn CatalogStore> {
        &self.catalog
    }

    /// The matcher used by the lookup stage
    pub fn matcher(&self) -> Matcher {
        self.matcher
    }

    /// The reservation ledger backing the booking stage
    pub fn ledger(&self) -> &ReservationLedger {
        &self.ledger
    }

    /// The confirmation notifier
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

impl std::fmt::Debug for IntakePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakePipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing pipelines
pub struct PipelineBuilder {
    catalog: Option<Arc<dyn CatalogStore>>,
    ledger: Option<ReservationLedger>,
    notifier: Option<Arc<dyn Notifier>>,
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            catalog: None,
            ledger: None,
            notifier: None,
            config: PipelineConfig::default(),
        }
    }

    /// Set the catalog store (required)
    pub fn catalog(mut self, catalog: Arc<dyn CatalogStore>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use an existing ledger instead of a fresh empty one
    ///
    /// Lets several pipelines (or a restarted process) share booking state.
    pub fn ledger(mut self, ledger: ReservationLedger) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Set the confirmation notifier (defaults to [`LogNotifier`])
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the required-field configuration for the qualification stage
    pub fn collector_config(mut self, collector: CollectorConfig) -> Self {
        self.config.collector = collector;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<IntakePipeline> {
        let catalog = self
            .catalog
            .ok_or_else(|| Error::Config("catalog store not set".to_string()))?;

        Ok(IntakePipeline {
            catalog,
            matcher: Matcher::new(),
            ledger: self.ledger.unwrap_or_default(),
            notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotifier)),
            config: self.config,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_catalog::InMemoryCatalog;

    #[test]
    fn test_builder_requires_catalog() {
        let err = IntakePipeline::builder().build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_clones_share_the_ledger() {
        let pipeline = IntakePipeline::builder()
            .catalog(Arc::new(InMemoryCatalog::new()))
            .build()
            .unwrap();
        let other = pipeline.clone();

        // Same underlying storage, observed through either handle
        pipeline
            .ledger()
            .book(
                intake_ledger::Slot::new("x", "2025-01-01", "09:00"),
                "alex",
                "X",
            )
            .await
            .unwrap();
        assert_eq!(other.ledger().len().await, 1);
    }
}
