pub mod text_import;

pub use text_import::TextImportPipeline;
