use crate::domain::directory::Directory;
use crate::domain::model::ConnectionParams;
use crate::utils::error::Result;

/// Line-oriented access to named text resources.
pub trait LineStore {
    fn read_lines(&self, path: &str) -> Result<Vec<String>>;
    fn write_lines(&self, path: &str, lines: &[String]) -> Result<()>;
}

pub trait ConfigProvider {
    fn connection_params(&self) -> ConnectionParams;
    fn source_path(&self) -> &str;
    fn replace_existing(&self) -> bool;
}

/// The three stages of an import: raw lines, staged directory, stored rows.
pub trait Pipeline {
    fn extract(&self) -> Result<Vec<String>>;
    fn transform(&self, lines: Vec<String>) -> Result<Directory>;
    /// Persists the staged directory and returns the number of rows written.
    fn load(&self, directory: &Directory) -> Result<usize>;
}
