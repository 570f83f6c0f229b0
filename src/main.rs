// SPDX-License-Identifier: MPL-2.0
use folio_flip::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "folio_flip=info";

const USAGE: &str = "\
Usage: folio_flip [OPTIONS]

Options:
  --source <PATH|URL>   Portfolio document (JSON or JSONP)
  --config-dir <DIR>    Directory holding settings.toml
  --columns <1|2|3>     Columns per row on wide windows
  -h, --help            Print this help
";

fn main() -> iced::Result {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{USAGE}");
        return Ok(());
    }

    let flags = match parse_flags(&mut args) {
        Ok(flags) => flags,
        Err(err) => {
            tracing::error!(error = %err, "invalid arguments");
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }

    paths::init_cli_override(flags.config_dir.clone());
    app::run(flags)
}

fn parse_flags(args: &mut pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    Ok(Flags {
        source: args.opt_value_from_str("--source")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        columns: args.opt_value_from_str("--columns")?,
    })
}
