use anyhow::Context;
use sift_config::SiftConfig;
use sift_db::DatasetStore;
use sift_stats::AnalysisSession;

use crate::cli::SourceArgs;

/// Per-invocation resources: configuration, the analysis session, and the
/// dataset store once a command asks for it.
pub struct AppContext {
    pub config: SiftConfig,
    pub session: AnalysisSession,
    store: Option<DatasetStore>,
}

impl AppContext {
    #[must_use]
    pub const fn new(config: SiftConfig) -> Self {
        Self {
            config,
            session: AnalysisSession::new(),
            store: None,
        }
    }

    /// The dataset store, connected on first use.
    ///
    /// Fails when `DATABASE_URL` is unset or the store stays unreachable
    /// after the configured retries.
    pub async fn store(&mut self) -> anyhow::Result<&DatasetStore> {
        if self.store.is_none() {
            if !self.config.database.is_configured() {
                anyhow::bail!(
                    "{} is not set; stored dataset commands need a database URL",
                    sift_config::DATABASE_URL_VAR
                );
            }
            let store = DatasetStore::connect(&self.config.database)
                .await
                .context("failed to initialize dataset store")?;
            self.store = Some(store);
        }
        self.store
            .as_ref()
            .context("dataset store missing after initialization")
    }

    /// Load the table named by `source` into the session and re-declare the
    /// requested categorical columns. Without a file or dataset the session
    /// stays empty, and the command reports that no data is loaded.
    pub async fn load_source(&mut self, source: &SourceArgs) -> anyhow::Result<()> {
        if let Some(path) = &source.file {
            let table = sift_ingest::load_path(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            self.session.load(table, None);
        } else if let Some(id) = source.dataset {
            let table = self
                .store()
                .await?
                .load(id)
                .await
                .with_context(|| format!("failed to load stored dataset {id}"))?;
            self.session.load(table, Some(id));
        } else {
            tracing::debug!("no data source given");
            return Ok(());
        }

        let table = self.session.table_mut()?;
        for column in &source.categories {
            table
                .categorize(column)
                .with_context(|| format!("cannot treat '{column}' as categorical"))?;
        }
        Ok(())
    }
}
