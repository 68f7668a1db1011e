//! Playlist line to txtp conversion
//!
//! Conversion is pure: a line and the run [`Options`] fully determine the
//! result. Writing the result is left to the [`Dumper`](crate::Dumper).
//!
//! ## Pipeline
//!
//! 1. Surrounding whitespace is trimmed
//! 2. Lines starting with `#` are comments and skipped
//! 3. Lines not ending in `.txtp` are skipped, or extended when forced
//! 4. Mini mode uses the line as the file name with no content
//! 5. Full mode names the file after the text before the first `.` and
//!    writes the line without any `.txtp` as the reference

use crate::options::{Options, TXTP_EXT};
use crate::txtp::Txtp;
use std::borrow::Cow;
use std::fmt;

/// Lines starting with this are comments (`#EXTM3U`, `# %TITLE ...`)
pub const COMMENT_PREFIX: char = '#';

/// Why a line produced no file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Comment or playlist metadata
    Comment,
    /// No `.txtp` suffix and force is off
    NotTxtp,
    /// Full mode line whose first extension is already `.txtp`
    BareExtension,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::Comment => write!(f, "comment"),
            Skip::NotTxtp => write!(f, "not a .txtp line"),
            Skip::BareExtension => write!(f, "no track reference before .txtp"),
        }
    }
}

/// Outcome of converting a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Write this file
    Emit(Txtp),
    /// Produce nothing
    Skip(Skip),
}

impl Conversion {
    /// Consume into the file to write, if any
    pub fn into_txtp(self) -> Option<Txtp> {
        match self {
            Conversion::Emit(txtp) => Some(txtp),
            Conversion::Skip(_) => None,
        }
    }
}

/// Split playlist text into lines.
///
/// `\r\n`, `\n` and a lone `\r` each end a line. A final terminator does not
/// start an extra empty line.
pub fn split_lines(input: &str) -> Lines<'_> {
    Lines { rest: input }
}

/// Iterator returned by [`split_lines`]
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let Some(end) = self.rest.find(|c: char| c == '\r' || c == '\n') else {
            let line = self.rest;
            self.rest = "";
            return Some(line);
        };

        let line = &self.rest[..end];
        let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[end + terminator..];

        Some(line)
    }
}

/// Converts playlist lines into txtp files
pub struct Converter {
    full: bool,
    force: bool,
    normalize_separators: bool,
    /// Normalized subdir, computed once per run
    prefix: Option<String>,
}

impl Converter {
    /// Create a converter for the given options
    pub fn new(options: &Options) -> Self {
        Self {
            full: options.is_full(),
            force: options.force,
            normalize_separators: options.normalize_separators,
            prefix: options.subdir_prefix().map(Cow::into_owned),
        }
    }

    /// Convert every line of `input`, in order
    pub fn convert<'s>(&'s self, input: &'s str) -> impl Iterator<Item = Conversion> + 's {
        split_lines(input).map(move |line| self.convert_line(line))
    }

    /// Convert a single raw line
    pub fn convert_line(&self, raw: &str) -> Conversion {
        let line = raw.trim();

        if line.starts_with(COMMENT_PREFIX) {
            return Conversion::Skip(Skip::Comment);
        }

        let mut line = Cow::Borrowed(line);

        if !line.ends_with(TXTP_EXT) {
            if !self.force {
                return Conversion::Skip(Skip::NotTxtp);
            }

            line.to_mut().push_str(TXTP_EXT);
        }

        if self.normalize_separators && line.contains('\\') {
            line = Cow::Owned(line.replace('\\', "/"));
        }

        if !self.full {
            return Conversion::Emit(Txtp::mini(line.into_owned()));
        }

        self.convert_full(&line)
    }

    /// Full txtp: name from the text before the first `.`, content from the
    /// line with every `.txtp` removed.
    fn convert_full(&self, line: &str) -> Conversion {
        // Not a real extension parser: `bgm.awb#1.txtp` splits at `.awb`
        let Some(index) = line.find('.') else {
            return Conversion::Skip(Skip::BareExtension);
        };

        let (base, rest) = line.split_at(index);

        if rest.starts_with(TXTP_EXT) {
            return Conversion::Skip(Skip::BareExtension);
        }

        let name = format!("{}{}", base, TXTP_EXT);
        let stripped = line.replace(TXTP_EXT, "");
        let reference = stripped.trim();

        let content = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, reference),
            None => reference.to_string(),
        };

        Conversion::Emit(Txtp::full(name, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(options: &Options, line: &str) -> Conversion {
        Converter::new(options).convert_line(line)
    }

    #[test]
    fn test_comment_skipped() {
        let options = Options::new().with_force(true);
        assert_eq!(convert(&options, "# %TITLE Stage 1"), Conversion::Skip(Skip::Comment));
        assert_eq!(convert(&options, "   #EXTM3U"), Conversion::Skip(Skip::Comment));
        assert_eq!(convert(&options, "#bgm.awb#1.txtp"), Conversion::Skip(Skip::Comment));
    }

    #[test]
    fn test_not_txtp_skipped_without_force() {
        let options = Options::new();
        assert_eq!(convert(&options, "bgm.awb#1"), Conversion::Skip(Skip::NotTxtp));
        assert_eq!(convert(&options, ""), Conversion::Skip(Skip::NotTxtp));
        assert_eq!(convert(&options, "bgm.txtp.bak"), Conversion::Skip(Skip::NotTxtp));
    }

    #[test]
    fn test_mini() {
        let options = Options::new();
        assert_eq!(
            convert(&options, "bgm.awb#1.txtp"),
            Conversion::Emit(Txtp::mini("bgm.awb#1.txtp"))
        );
    }

    #[test]
    fn test_mini_trims_whitespace() {
        let options = Options::new();
        assert_eq!(
            convert(&options, "  bgm.awb#1 .txtp \r"),
            Conversion::Emit(Txtp::mini("bgm.awb#1 .txtp"))
        );
    }

    #[test]
    fn test_force_appends_extension() {
        let options = Options::new().with_force(true);
        assert_eq!(
            convert(&options, "bgm.awb#1"),
            Conversion::Emit(Txtp::mini("bgm.awb#1.txtp"))
        );

        let options = Options::new().with_force(true).with_full(true);
        assert_eq!(
            convert(&options, "bgm.awb#1"),
            Conversion::Emit(Txtp::full("bgm.txtp", "bgm.awb#1"))
        );
    }

    #[test]
    fn test_full() {
        let options = Options::new().with_full(true);
        assert_eq!(
            convert(&options, "bgm.awb#1 .txtp"),
            Conversion::Emit(Txtp::full("bgm.txtp", "bgm.awb#1"))
        );
    }

    #[test]
    fn test_full_removes_every_txtp() {
        let options = Options::new().with_full(true);
        assert_eq!(
            convert(&options, "se.acb.txtp#2.txtp"),
            Conversion::Emit(Txtp::full("se.txtp", "se.acb#2"))
        );
    }

    #[test]
    fn test_subdir() {
        let options = Options::new().with_subdir("sound");
        assert_eq!(
            convert(&options, "bgm.awb#1.txtp"),
            Conversion::Emit(Txtp::full("bgm.txtp", "sound/bgm.awb#1"))
        );
    }

    #[test]
    fn test_subdir_backslashes() {
        let options = Options::new().with_subdir("data\\sound\\");
        assert_eq!(
            convert(&options, "bgm.awb#1.txtp"),
            Conversion::Emit(Txtp::full("bgm.txtp", "data/sound/bgm.awb#1"))
        );
    }

    #[test]
    fn test_bare_extension_skipped_in_full() {
        let options = Options::new().with_full(true);
        assert_eq!(convert(&options, ".txtp"), Conversion::Skip(Skip::BareExtension));
        assert_eq!(convert(&options, "x.txtp"), Conversion::Skip(Skip::BareExtension));
        assert_eq!(
            convert(&options, "x.txtp.awb#1.txtp"),
            Conversion::Skip(Skip::BareExtension)
        );
    }

    #[test]
    fn test_bare_extension_kept_in_mini() {
        let options = Options::new();
        assert_eq!(convert(&options, "x.txtp"), Conversion::Emit(Txtp::mini("x.txtp")));
    }

    #[test]
    fn test_forced_blank_line() {
        let options = Options::new().with_force(true);
        assert_eq!(convert(&options, "   "), Conversion::Emit(Txtp::mini(".txtp")));

        let options = options.with_full(true);
        assert_eq!(convert(&options, "   "), Conversion::Skip(Skip::BareExtension));
    }

    #[test]
    fn test_line_backslashes_kept_by_default() {
        let options = Options::new().with_full(true);
        assert_eq!(
            convert(&options, "dir\\bgm.awb#1.txtp"),
            Conversion::Emit(Txtp::full("dir\\bgm.txtp", "dir\\bgm.awb#1"))
        );
    }

    #[test]
    fn test_line_backslashes_normalized() {
        let options = Options::new().with_normalize_separators(true);
        assert_eq!(
            convert(&options, "dir\\bgm.awb#1.txtp"),
            Conversion::Emit(Txtp::mini("dir/bgm.awb#1.txtp"))
        );
    }

    #[test]
    fn test_convert_lines() {
        let options = Options::new().with_full(true);
        let converter = Converter::new(&options);
        let input = "#EXTM3U\n# %TITLE Stage 1\nbgm.awb#1 .txtp\nreadme\r\nbgm.awb#2 .txtp\n";

        let files: Vec<Txtp> = converter
            .convert(input)
            .filter_map(Conversion::into_txtp)
            .collect();

        assert_eq!(
            files,
            vec![
                Txtp::full("bgm.txtp", "bgm.awb#1"),
                Txtp::full("bgm.txtp", "bgm.awb#2"),
            ]
        );
    }

    #[test]
    fn test_split_lines_terminators() {
        let lines: Vec<&str> = split_lines("a\nb\r\nc\rd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);

        let lines: Vec<&str> = split_lines("a\r\rb\n\nc\r\n").collect();
        assert_eq!(lines, vec!["a", "", "b", "", "c"]);

        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("\r\n").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_convert_cr_only_lines() {
        let options = Options::new();
        let converter = Converter::new(&options);

        let files: Vec<Txtp> = converter
            .convert("a.awb#1.txtp\rb.awb#2.txtp\r")
            .filter_map(Conversion::into_txtp)
            .collect();

        assert_eq!(files, vec![Txtp::mini("a.awb#1.txtp"), Txtp::mini("b.awb#2.txtp")]);
    }

    #[test]
    fn test_convert_mixed_line_endings_forced() {
        let options = Options::new().with_force(true);
        let converter = Converter::new(&options);

        let files: Vec<Txtp> = converter
            .convert("#EXTM3U\r\na.awb#1\rb.awb#2.txtp\nc.awb#3\r\n")
            .filter_map(Conversion::into_txtp)
            .collect();

        assert_eq!(
            files,
            vec![
                Txtp::mini("a.awb#1.txtp"),
                Txtp::mini("b.awb#2.txtp"),
                Txtp::mini("c.awb#3.txtp"),
            ]
        );
    }

    #[test]
    fn test_skip_display() {
        assert_eq!(Skip::Comment.to_string(), "comment");
        assert_eq!(Skip::NotTxtp.to_string(), "not a .txtp line");
    }
}
