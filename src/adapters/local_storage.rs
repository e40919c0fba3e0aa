use crate::core::LineStore;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// UTF-8 text files below a base directory. Absolute paths bypass the base.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl LineStore for LocalStorage {
    fn read_lines(&self, path: &str) -> Result<Vec<String>> {
        let full_path = self.resolve(path);
        let content = fs::read_to_string(&full_path)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        tracing::debug!("Read {} lines from {}", lines.len(), full_path.display());
        Ok(lines)
    }

    fn write_lines(&self, path: &str, lines: &[String]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&full_path, content)?;

        tracing::debug!("Wrote {} lines to {}", lines.len(), full_path.display());
        Ok(())
    }
}
