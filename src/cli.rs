use crate::options::LoggerOptions;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Chain Logger - write a styled log line built from a chain of modes and modifiers
#[derive(Parser, Debug, Clone, Default)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Modifier to terminate the chain on (log, info, warn, error, red, ...)
    #[clap(default_value = crate::defaults::DEFAULT_MODIFIER)]
    pub modifier: String,

    /// Arguments of the terminal call; the first may be a printf-style template
    pub args: Vec<String>,

    /// Dot-separated names accessed before the terminal call (e.g. "not.verbose.red")
    #[clap(short = 'c', long)]
    pub chain: Option<String>,

    /// Open the `verbose` mode gate
    #[clap(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Strip ANSI styling from output
    #[clap(long, default_value_t = false)]
    pub strip_color: bool,

    /// Do not subscribe the built-in renderer (nothing is written)
    #[clap(long, default_value_t = false)]
    pub no_default_listener: bool,

    /// JSON file with logger options; flags given on the command line win
    #[clap(short = 'o', long)]
    pub options: Option<PathBuf>,

    /// Print the engine's own diagnostics to stderr
    #[clap(long, default_value_t = false)]
    pub trace: bool,
}

impl Args {
    /// Merge the options file (if any) with command-line flags
    pub fn logger_options(&self) -> Result<LoggerOptions> {
        let mut options = match &self.options {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading options file {}", path.display()))?;
                LoggerOptions::from_json(&json)
                    .with_context(|| format!("parsing options file {}", path.display()))?
            }
            None => LoggerOptions::default(),
        };
        if self.verbose {
            options.verbose = Some(true);
        }
        if self.strip_color {
            options.strip_color = true;
        }
        if self.no_default_listener {
            options.default_listener = false;
        }
        Ok(options)
    }

    /// Names in `--chain`, in access order
    pub fn chain_names(&self) -> Vec<&str> {
        self.chain
            .as_deref()
            .map(|chain| chain.split('.').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }
}
