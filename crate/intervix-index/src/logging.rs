//! Log setup for binaries built on this crate.
//!
//! The library itself only emits through the `log` facade: index
//! construction at debug level, lookups and misses at trace level.

use env_logger::Builder;
use std::io::Write;

/// Install an `env_logger` backend showing warnings and errors.
///
/// See [init_with_info_modules].
pub fn init() {
    init_with_info_modules(&[])
}

/// Install an `env_logger` backend showing warnings and errors, plus
/// info messages from `info_modules`.
///
/// `RUST_LOG` takes precedence over these defaults, for example
/// `RUST_LOG=intervix_index=trace` to follow every lookup. With
/// `RUST_LOG_FORMAT=SYSTEMD`, lines are prefixed with their syslog
/// priority for journald.
///
/// Does nothing if a logger is already installed.
pub fn init_with_info_modules(info_modules: &[&str]) {
    let mut builder = Builder::new();
    if std::env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "SYSTEMD") {
        enable_systemd_log_format(&mut builder);
    }

    builder.filter_level(log::LevelFilter::Warn);
    for &module in info_modules {
        builder.filter_module(module, log::LevelFilter::Info);
    }

    builder.parse_default_env();
    let _ = builder.try_init();
}

/// Write `<priority>target: message`, without a timestamp; journald
/// adds its own.
fn enable_systemd_log_format(builder: &mut Builder) {
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "<{}>{}: {}",
            syslog_priority(record.level()),
            record.target(),
            record.args()
        )
    });
}

fn syslog_priority(level: log::Level) -> u8 {
    match level {
        log::Level::Error => 3,
        log::Level::Warn => 4,
        log::Level::Info => 5,
        log::Level::Debug => 7,
        log::Level::Trace => 7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities() {
        assert_eq!(3, syslog_priority(log::Level::Error));
        assert_eq!(4, syslog_priority(log::Level::Warn));
        assert_eq!(5, syslog_priority(log::Level::Info));
        assert_eq!(7, syslog_priority(log::Level::Trace));
    }

    #[test]
    fn init_twice_is_harmless() {
        init();
        init_with_info_modules(&["intervix_index"]);
    }
}
