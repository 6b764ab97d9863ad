//! # Chain Logger - Command-Line Entry Point
//!
//! Attaches a logger to a host application and emits one log statement built
//! from the command line:
//!
//! 1. **Initialize diagnostics**: the engine's own tracing output goes to stderr
//! 2. **Parse arguments**: terminal modifier, call arguments, chain and options
//! 3. **Attach the logger**: via the logger plugin on an `App` host
//! 4. **Walk the chain**: each `--chain` segment is accessed in order
//! 5. **Terminate**: the modifier is invoked with the remaining arguments
//!
//! Example: `chain-logger --verbose --chain verbose.red log "hello %s" world`

use anyhow::{Context, Result};
use chain_logger::{cli::Args, logger_plugin, logging, App};
use clap::Parser;
use tracing::debug;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(if args.trace {
        "chain_logger=trace"
    } else {
        "warn"
    });
    debug!("Configuration: {:?}", args);

    let options = args.logger_options()?;

    let mut app = App::new(env!("CARGO_PKG_NAME"));
    app.use_plugin(logger_plugin(options))?;
    let logger = app
        .logger()
        .context("logger plugin did not attach a logger")?;

    let mut chain = logger.chain();
    for name in args.chain_names() {
        chain = chain
            .get(name)
            .with_context(|| format!("resolving chain segment `{}`", name))?;
    }

    chain
        .call(&args.modifier, args.args.clone())
        .with_context(|| format!("logging through `{}`", args.modifier))?;

    Ok(())
}
