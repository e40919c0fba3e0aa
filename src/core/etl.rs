use crate::core::Pipeline;
use crate::utils::error::Result;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The text resource was missing, unreadable or empty.
    NothingToImport,
    /// Records were read but none survived validation.
    NoValidRecords { seen: usize },
    Migrated {
        seen: usize,
        accepted: usize,
        written: usize,
    },
    /// The migration stopped on an error; `message` is meant for the user.
    Failed { message: String },
}

impl MigrationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Migrated { .. })
    }

    pub fn rows_written(&self) -> usize {
        match self {
            Self::Migrated { written, .. } => *written,
            _ => 0,
        }
    }
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToImport => write!(f, "Nothing to import"),
            Self::NoValidRecords { seen } => {
                write!(f, "{} records seen, 0 migrated", seen)
            }
            Self::Migrated {
                seen,
                accepted,
                written,
            } => write!(
                f,
                "{} records seen, {} migrated, {} rows written",
                seen, accepted, written
            ),
            Self::Failed { message } => write!(f, "Import error: {}", message),
        }
    }
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load, stopping early when there is
    /// nothing left to store.
    pub fn run(&self) -> Result<MigrationOutcome> {
        tracing::info!("Starting import...");

        // Extract
        let lines = match self.pipeline.extract() {
            Ok(lines) if !lines.is_empty() => lines,
            Ok(_) => {
                tracing::warn!("Text resource is empty");
                return Ok(MigrationOutcome::NothingToImport);
            }
            Err(e) => {
                tracing::warn!("Could not read text resource: {}", e);
                return Ok(MigrationOutcome::NothingToImport);
            }
        };
        let seen = lines.len() - 1;
        if seen == 0 {
            tracing::warn!("Text resource holds a prefix but no records");
            return Ok(MigrationOutcome::NothingToImport);
        }
        tracing::info!("Extracted {} candidate records", seen);

        // Transform
        let directory = self.pipeline.transform(lines)?;
        let accepted = directory.count();
        if accepted == 0 {
            tracing::warn!("No valid records among {} for room {}", seen, directory.prefix());
            return Ok(MigrationOutcome::NoValidRecords { seen });
        }
        tracing::info!(
            "Staged {} of {} records for room {}",
            accepted,
            seen,
            directory.prefix()
        );

        // Load
        let written = self.pipeline.load(&directory)?;
        tracing::info!("Wrote {} rows", written);

        Ok(MigrationOutcome::Migrated {
            seen,
            accepted,
            written,
        })
    }

    /// Like [`EtlEngine::run`], but errors become [`MigrationOutcome::Failed`].
    pub fn migrate(&self) -> MigrationOutcome {
        match self.run() {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    "Import failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
                MigrationOutcome::Failed {
                    message: e.user_friendly_message(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directory::Directory;
    use crate::utils::error::InventoryError;
    use std::cell::RefCell;

    struct MockPipeline {
        lines: Option<Vec<String>>,
        load_error: bool,
        loaded: RefCell<Vec<usize>>,
    }

    impl MockPipeline {
        fn with_lines(lines: &[&str]) -> Self {
            Self {
                lines: Some(lines.iter().map(|l| l.to_string()).collect()),
                load_error: false,
                loaded: RefCell::new(Vec::new()),
            }
        }

        fn unreadable() -> Self {
            Self {
                lines: None,
                load_error: false,
                loaded: RefCell::new(Vec::new()),
            }
        }
    }

    impl Pipeline for MockPipeline {
        fn extract(&self) -> Result<Vec<String>> {
            self.lines.clone().ok_or_else(|| {
                InventoryError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "File not found",
                ))
            })
        }

        fn transform(&self, lines: Vec<String>) -> Result<Directory> {
            Directory::create_from_lines(&lines)
        }

        fn load(&self, directory: &Directory) -> Result<usize> {
            if self.load_error {
                return Err(InventoryError::store("disk full"));
            }
            self.loaded.borrow_mut().push(directory.count());
            Ok(directory.count())
        }
    }

    #[test]
    fn test_unreadable_resource_is_nothing_to_import() {
        let engine = EtlEngine::new(MockPipeline::unreadable());
        assert_eq!(engine.migrate(), MigrationOutcome::NothingToImport);
    }

    #[test]
    fn test_empty_resource_is_nothing_to_import() {
        let engine = EtlEngine::new(MockPipeline::with_lines(&[]));
        assert_eq!(engine.run().unwrap(), MigrationOutcome::NothingToImport);

        let engine = EtlEngine::new(MockPipeline::with_lines(&["IC"]));
        assert_eq!(engine.run().unwrap(), MigrationOutcome::NothingToImport);
    }

    #[test]
    fn test_no_valid_records_skips_load() {
        let engine = EtlEngine::new(MockPipeline::with_lines(&["IC", "junk", "AX01##PC1##Ana##Ruiz"]));
        let outcome = engine.run().unwrap();

        assert_eq!(outcome, MigrationOutcome::NoValidRecords { seen: 2 });
        assert_eq!(outcome.to_string(), "2 records seen, 0 migrated");
        assert!(engine.pipeline().loaded.borrow().is_empty());
    }

    #[test]
    fn test_migrated_counts() {
        let engine = EtlEngine::new(MockPipeline::with_lines(&[
            "IC",
            "IC01##PC1##Ana##Ruiz",
            "junk",
            "IC02##PC2##Bea##Soto",
        ]));
        let outcome = engine.run().unwrap();

        assert_eq!(
            outcome,
            MigrationOutcome::Migrated {
                seen: 3,
                accepted: 2,
                written: 2
            }
        );
        assert!(outcome.is_success());
        assert_eq!(outcome.rows_written(), 2);
    }

    #[test]
    fn test_bad_prefix_becomes_failed_outcome() {
        let engine = EtlEngine::new(MockPipeline::with_lines(&["TOOLONG", "IC01##PC1##Ana##Ruiz"]));

        assert!(engine.run().unwrap_err().is_validation());
        match engine.migrate() {
            MigrationOutcome::Failed { message } => assert!(message.contains("Prefix length")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_load_error_becomes_failed_outcome() {
        let mut pipeline = MockPipeline::with_lines(&["IC", "IC01##PC1##Ana##Ruiz"]);
        pipeline.load_error = true;
        let outcome = EtlEngine::new(pipeline).migrate();

        assert!(!outcome.is_success());
        assert!(outcome.to_string().contains("disk full"));
    }
}
