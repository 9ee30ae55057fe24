// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use torch_scheduler::app::{self, Flags};
use torch_scheduler::error::{Error, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const HELP: &str = "\
torch-demo: paced display of transient messages

USAGE:
  torch-demo [OPTIONS]

OPTIONS:
  --cap N              Messages shown at once (1-16)
  --duration MS        Default display time in milliseconds (0 = until dismissed)
  --cooldown MS        Minimum gap between two removals
  --count N            Number of demo messages to submit
  --config PATH        Settings file to read
  --data-dir PATH      Directory for the saved snapshot
  --stop-after N       Save a snapshot and stop after N removals
  --resume             Restore the saved snapshot first
  -v, --verbose        Log scheduler decisions (same as RUST_LOG=debug)
  -h, --help           Print this help
";

fn parse_flags(args: &mut pico_args::Arguments) -> Result<Flags> {
    Ok(Flags {
        cap: args.opt_value_from_str("--cap")?,
        duration_ms: args.opt_value_from_str("--duration")?,
        cooldown_ms: args.opt_value_from_str("--cooldown")?,
        count: args.opt_value_from_str("--count")?,
        config_path: args.opt_value_from_str::<_, PathBuf>("--config")?,
        data_dir: args.opt_value_from_str::<_, PathBuf>("--data-dir")?,
        stop_after: args.opt_value_from_str("--stop-after")?,
        resume: args.contains("--resume"),
    })
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Io(err.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let verbose = args.contains(["-v", "--verbose"]);
    let flags = parse_flags(&mut args)?;
    let remaining = args.finish();
    if !remaining.is_empty() {
        return Err(Error::Args(format!("unexpected arguments: {remaining:?}")));
    }

    init_logging(verbose)?;
    app::run(flags).await
}
