use crate::core::store::StoreSession;
use crate::core::{ConfigProvider, Directory, LineStore, Pipeline};
use crate::utils::error::Result;

/// Moves an interchange text file into the relational store.
pub struct TextImportPipeline<L: LineStore, C: ConfigProvider> {
    pub(crate) storage: L,
    pub(crate) config: C,
    pub(crate) dry_run: bool,
}

impl<L: LineStore, C: ConfigProvider> TextImportPipeline<L, C> {
    pub fn new(storage: L, config: C) -> Self {
        Self {
            storage,
            config,
            dry_run: false,
        }
    }

    /// Stages and reports without opening the store.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl<L: LineStore, C: ConfigProvider> Pipeline for TextImportPipeline<L, C> {
    fn extract(&self) -> Result<Vec<String>> {
        tracing::debug!("Reading records from {}", self.config.source_path());
        self.storage.read_lines(self.config.source_path())
    }

    fn transform(&self, lines: Vec<String>) -> Result<Directory> {
        Directory::create_from_lines(&lines)
    }

    fn load(&self, directory: &Directory) -> Result<usize> {
        if self.dry_run {
            tracing::info!("Dry run: {} not written", directory);
            return Ok(0);
        }

        let mut session = StoreSession::from_config(&self.config);
        session.open()?;

        if self.config.replace_existing() {
            session.clear()?;
        }
        let written = session.write_all(directory)?;

        session.close()?;
        Ok(written)
    }
}
