//! Generated marker files

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A `.txtp` file derived from one playlist line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Txtp {
    /// File name, relative to the output directory
    pub name: String,
    /// Reference text; empty for mini-txtp
    pub content: String,
}

impl Txtp {
    /// Create an empty mini-txtp whose name carries the reference
    pub fn mini(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: String::new(),
        }
    }

    /// Create a full txtp with an explicit reference line
    pub fn full(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Whether this is a mini-txtp (no content)
    pub fn is_mini(&self) -> bool {
        self.content.is_empty()
    }

    /// Create or truncate `dir/name` and write the content.
    ///
    /// No trailing newline is added, so rewriting the same entry always
    /// yields identical bytes.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.name);

        fs::write(&path, self.content.as_bytes())
            .with_context(|| format!("Failed to write: {}", path.display()))?;

        Ok(path)
    }
}
