//! # txtp-dumper
//!
//! Generate `.txtp` marker files from a playlist of virtual track references.
//!
//! Players that understand txtp resolve a name such as `bgm.awb#1.txtp` to
//! subsong 1 of `bgm.awb`. A playlist (usually an `.m3u`) lists those names,
//! one per line; this crate writes one file per line so the playlist entries
//! exist on disk.
//!
//! ```text
//! #EXTM3U
//! # %TITLE Stage 1
//! bgm.awb#1 .txtp
//! ```
//!
//! ## Output Forms
//!
//! - **Mini-txtp** (default): an empty file named exactly as the line.
//! - **Full txtp**: a file named after the text before the first `.`, holding
//!   the reference with every `.txtp` removed, e.g. `bgm.txtp` containing
//!   `bgm.awb#1`.
//! - **Subdir**: full txtp with the reference prefixed by a directory, e.g.
//!   `sound/bgm.awb#1`.
//!
//! ## Line Rules
//!
//! 1. Lines starting with `#` are comments and skipped
//! 2. Lines not ending in `.txtp` are skipped unless forced
//! 3. In full mode, lines whose first extension is `.txtp` are skipped
//!
//! Conversion is pure ([`Converter`]); only the [`Dumper`] touches the disk.

pub mod converter;
pub mod dumper;
pub mod options;
pub mod txtp;

pub use converter::{split_lines, Conversion, Converter, Skip};
pub use dumper::{expand_patterns, Dumper, Summary};
pub use options::{Options, TXTP_EXT};
pub use txtp::Txtp;
