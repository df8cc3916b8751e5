//! Logging setup shared by the command-line tools.
//!
//! Records go to stderr and, when a log directory is given, to
//! `<dir>/<program>.log` as well. `RUST_LOG` overrides the chosen level.

use crate::error::Result;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Width of the `=====  Starting ...  =====` banners.
pub const BANNER_WIDTH: usize = 65;

/// How chatty the tools are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Verbosity {
    #[default]
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARN")]
    Warn,
    #[value(name = "CRITICAL")]
    Critical,
}

impl Verbosity {
    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Warn => log::LevelFilter::Warn,
            Verbosity::Critical => log::LevelFilter::Error,
        }
    }
}

/// Writes every record to stderr and a log file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Initialise the global logger for `program`.
pub fn init_logging(program: &str, verbosity: Verbosity, log_dir: Option<&Path>) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(verbosity.level_filter().to_string());
    let mut builder = env_logger::Builder::from_env(env);

    let name = program.to_string();
    builder.format(move |buf, record| {
        writeln!(
            buf,
            "{} - {} - {} - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            name,
            record.level(),
            record.args()
        )
    });

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("{program}.log")))?;
        builder.target(env_logger::Target::Pipe(Box::new(Tee { file })));
    }

    // A second init (e.g. from tests) keeps the first logger
    let _ = builder.try_init();
    Ok(())
}

/// Center ` text ` in a line of `=`.
///
/// With an odd amount of padding on an odd width, the extra `=` goes on the
/// left, as Python's `str.center` does.
pub fn banner(text: &str) -> String {
    let label = format!(" {text} ");
    let margin = BANNER_WIDTH.saturating_sub(label.chars().count());
    let left = margin / 2 + (margin & BANNER_WIDTH & 1);
    let right = margin - left;
    format!("{}{label}{}", "=".repeat(left), "=".repeat(right))
}
