//! Diagnostics on stderr.
//!
//! Progress for the user goes through [`crate::output::OutputManager`] on
//! stdout; tracing events are for diagnosing a run and go to stderr. The
//! level comes from `-v`/`-q` unless `RUST_LOG` is set.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events are shown at the chosen level.
const CRATES: [&str; 3] = ["ejector", "ejector_core", "ejector_adapters"];

/// Install the global subscriber. Call once from `main`.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(filter_directives(level_for(args)))?,
    };

    let events = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(args.verbose >= 2)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(events)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn filter_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_ascii_lowercase();
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `--quiet` beats any number of `-v`.
fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
        }
    }

    #[test]
    fn warnings_only_by_default() {
        assert_eq!(level_for(&flags(0, false)), LevelFilter::WARN);
    }

    #[test]
    fn each_v_raises_the_level_up_to_trace() {
        let levels: Vec<_> = (1..=4).map(|v| level_for(&flags(v, false))).collect();
        assert_eq!(
            levels,
            [
                LevelFilter::INFO,
                LevelFilter::DEBUG,
                LevelFilter::TRACE,
                LevelFilter::TRACE
            ]
        );
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(level_for(&flags(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn one_directive_per_crate() {
        let directives = filter_directives(LevelFilter::DEBUG);
        assert_eq!(
            directives,
            "ejector=debug,ejector_core=debug,ejector_adapters=debug"
        );
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
