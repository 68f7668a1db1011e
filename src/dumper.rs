//! Playlist reading and txtp writing

use crate::converter::{split_lines, Conversion, Converter};
use crate::options::Options;
use anyhow::{Context, Result};
use glob::MatchOptions;
use log::{debug, info, trace, warn};
use std::fs;
use std::path::{Path, PathBuf};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Counters for one playlist or a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Playlists read
    pub files: usize,
    /// Lines seen
    pub lines: usize,
    /// Txtp files written
    pub written: usize,
    /// Lines that produced nothing
    pub skipped: usize,
}

impl Summary {
    /// Add another summary's counters to this one
    pub fn merge(&mut self, other: Summary) {
        self.files += other.files;
        self.lines += other.lines;
        self.written += other.written;
        self.skipped += other.skipped;
    }
}

/// Escape every `[` that never closes, so it matches itself.
///
/// Set syntax follows the matcher: `[!` negates and a `]` right after the
/// opening (or the `!`) is a member, not the close.
fn escape_unclosed_brackets(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut escaped = String::with_capacity(pattern.len());

    for (i, &c) in chars.iter().enumerate() {
        if c != '[' {
            escaped.push(c);
            continue;
        }

        let mut j = i + 1;
        if chars.get(j) == Some(&'!') {
            j += 1;
        }
        if chars.get(j) == Some(&']') {
            j += 1;
        }

        if chars[j.min(chars.len())..].contains(&']') {
            escaped.push(c);
        } else {
            escaped.push_str("[[]");
        }
    }

    escaped
}

/// Expand each pattern independently and concatenate the matches.
///
/// Patterns matching nothing contribute nothing. Wildcards do not match a
/// leading `.` in a file name. An unclosed `[` matches a literal `[`.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: true,
    };

    let mut paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();

        let entries = match glob::glob_with(pattern, options) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Pattern {} ({}), retrying with literal brackets", pattern, e);
                glob::glob_with(&escape_unclosed_brackets(pattern), options)
                    .with_context(|| format!("Invalid file pattern: {}", pattern))?
            }
        };

        let before = paths.len();

        for entry in entries {
            match entry {
                Ok(path) => paths.push(path),
                Err(e) => warn!("Unreadable match for {}: {}", pattern, e),
            }
        }

        debug!("Pattern {} matched {} file(s)", pattern, paths.len() - before);
    }

    Ok(paths)
}

/// Writes the txtp files for a set of playlists
pub struct Dumper {
    options: Options,
    converter: Converter,
}

impl Dumper {
    /// Create a dumper for the given options
    pub fn new(options: Options) -> Self {
        let converter = Converter::new(&options);
        Self { options, converter }
    }

    /// Create the configured output directory and its parents, ignoring
    /// failures.
    pub fn prepare_output_dir(&self) {
        let Some(output) = &self.options.output else {
            return;
        };

        match fs::create_dir_all(output) {
            Ok(()) => debug!("Output directory: {}", output.display()),
            Err(e) => debug!("Could not create {}: {}", output.display(), e),
        }
    }

    /// Process every playlist in order, stopping at the first error.
    ///
    /// An empty list returns immediately without touching the disk.
    pub fn run<P: AsRef<Path>>(&self, files: &[P]) -> Result<Summary> {
        let mut summary = Summary::default();

        if files.is_empty() {
            info!("No files to process");
            return Ok(summary);
        }

        self.prepare_output_dir();

        for file in files {
            summary.merge(self.dump_file(file.as_ref())?);
        }

        info!(
            "Wrote {} txtp from {} file(s), skipped {} of {} line(s)",
            summary.written, summary.files, summary.skipped, summary.lines
        );

        Ok(summary)
    }

    /// Read one playlist and write its txtp files
    pub fn dump_file(&self, path: &Path) -> Result<Summary> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;

        info!("Processing: {}", path.display());

        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text.as_str());
        let mut summary = self.dump_str(text)?;
        summary.files = 1;

        Ok(summary)
    }

    /// Convert playlist text and write its txtp files
    pub fn dump_str(&self, input: &str) -> Result<Summary> {
        let dir = self.options.output_dir();
        let mut summary = Summary::default();

        for (line, conversion) in split_lines(input).zip(self.converter.convert(input)) {
            trace!("Line: {:?}", line);
            summary.lines += 1;

            match conversion {
                Conversion::Emit(txtp) => {
                    let path = txtp.write_into(dir)?;
                    let form = if txtp.is_mini() { "mini" } else { "full" };
                    debug!("Wrote {}: {}", form, path.display());
                    summary.written += 1;
                }
                Conversion::Skip(reason) => {
                    debug!("Skipped ({}): {:?}", reason, line.trim());
                    summary.skipped += 1;
                }
            }
        }

        Ok(summary)
    }
}
