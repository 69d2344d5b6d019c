//! Logger setup. Normal output goes through `log::info!`, so the level
//! flags double as output verbosity.

use std::io::Write;

use log::{Level, LevelFilter};

const OWN_CRATES: &[&str] = &["iso360", "iso360_core", "iso360_xbox", "iso360_lookup"];

/// Level for this workspace's crates given the global flags.
pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` overrides the flag-derived levels.
pub(crate) fn init(quiet: bool, verbose: bool, to_stderr: bool) {
    let level = level_for(quiet, verbose);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    for name in OWN_CRATES {
        builder.filter_module(name, level);
    }
    builder.parse_default_env();
    builder.target(if to_stderr {
        env_logger::Target::Stderr
    } else {
        env_logger::Target::Stdout
    });

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Error => writeln!(buf, "error: {}", record.args()),
            _ => writeln!(buf, "{}", record.args()),
        });
    }

    // Only fails if a logger is already installed.
    let _ = builder.try_init();
}
