//! txtp-dumper CLI
//!
//! Make .txtp files from a playlist (usually .m3u) of virtual txtp names.

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;
use txtp_dumper::{expand_patterns, Dumper, Options};

const EXAMPLES: &str = "\
examples:
  txtp-dumper !tags.m3u
  - make .txtp per line in !tags.m3u

  txtp-dumper !tags.m3u -m
  - make full txtp rather than mini-txtp
    (may overwrite files when using subsongs)

  txtp-dumper lines.txt -s sound
  - make .txtp per line, setting a subdir";

#[derive(Parser, Debug)]
#[command(name = "txtp-dumper")]
#[command(author = "nzinfo <li.monan@gmail.com>")]
#[command(version)]
#[command(about = "Makes TXTP from list")]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Files to get (wildcards work)
    #[arg(required = true)]
    files: Vec<String>,

    /// Create .txtp pointing to subdir
    #[arg(short = 's')]
    subdir: Option<String>,

    /// Create regular txtp rather than mini-txtp
    #[arg(short = 'm')]
    full: bool,

    /// Make .txtp even if line isn't a .txtp
    #[arg(short = 'f')]
    force: bool,

    /// Output dir (default: current)
    #[arg(short = 'o')]
    output: Option<PathBuf>,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Options {
        let mut options = Options::new()
            .with_full(self.full)
            .with_force(self.force);

        if let Some(subdir) = &self.subdir {
            options = options.with_subdir(subdir.as_str());
        }

        if let Some(output) = &self.output {
            options = options.with_output(output);
        }

        options
    }

    fn level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut env_builder = env_logger::Builder::new();
    env_builder.filter_level(cli.level_filter());
    env_builder.parse_default_env();
    env_builder.format_timestamp(None);
    env_builder.try_init()?;

    let files = expand_patterns(&cli.files)?;

    if files.is_empty() {
        log::info!("No files matched");
        return Ok(());
    }

    Dumper::new(cli.options()).run(&files)?;

    Ok(())
}
