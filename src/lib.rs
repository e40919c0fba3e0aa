pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::LocalStorage;
pub use crate::app::pipelines::TextImportPipeline;
pub use crate::core::etl::{EtlEngine, MigrationOutcome};
pub use crate::core::store::StoreSession;
pub use crate::domain::directory::Directory;
pub use crate::domain::model::{ConnectionParams, Post};
pub use crate::utils::error::{InventoryError, Result};
