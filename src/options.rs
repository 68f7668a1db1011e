//! Run options

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Extension every generated marker file carries
pub const TXTP_EXT: &str = ".txtp";

/// Output directory used when none is configured
pub const DEFAULT_OUTPUT: &str = ".";

/// Options resolved once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Subdirectory prefixed to every reference (implies full txtp)
    pub subdir: Option<String>,
    /// Write full txtp content instead of empty mini-txtp files
    pub full: bool,
    /// Append `.txtp` to lines that lack it instead of skipping them
    pub force: bool,
    /// Destination directory (default: current directory)
    pub output: Option<PathBuf>,
    /// Rewrite backslashes in source lines to forward slashes
    pub normalize_separators: bool,
}

impl Options {
    /// Create options for a plain mini-txtp run
    pub fn new() -> Self {
        Self::default()
    }

    /// Point every reference into `subdir`; empty strings leave it unset
    pub fn with_subdir(mut self, subdir: impl Into<String>) -> Self {
        let subdir = subdir.into();
        self.subdir = if subdir.is_empty() { None } else { Some(subdir) };
        self
    }

    /// Produce full txtp content
    pub fn with_full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }

    /// Treat lines without `.txtp` as targets
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Write into `output` instead of the current directory
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Normalize backslashes in source lines before conversion
    pub fn with_normalize_separators(mut self, normalize: bool) -> Self {
        self.normalize_separators = normalize;
        self
    }

    /// Whether lines are converted to full txtp (explicitly or via subdir)
    pub fn is_full(&self) -> bool {
        self.full || self.subdir.is_some()
    }

    /// Directory output files are joined onto
    pub fn output_dir(&self) -> &Path {
        self.output
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT))
    }

    /// Subdir as a reference prefix: forward slashes, one trailing `/`
    pub fn subdir_prefix(&self) -> Option<Cow<'_, str>> {
        let subdir = self.subdir.as_deref()?;

        let mut prefix = if subdir.contains('\\') {
            Cow::Owned(subdir.replace('\\', "/"))
        } else {
            Cow::Borrowed(subdir)
        };

        if !prefix.ends_with('/') {
            prefix.to_mut().push('/');
        }

        Some(prefix)
    }
}
