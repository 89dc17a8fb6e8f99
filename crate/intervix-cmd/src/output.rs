use console::style;
use intervix_index::{IntervalIndex, Located};
use std::io::{self, Write};

/// Print an error message to stderr, with standard format.
pub(crate) fn print_error<T: AsRef<str>>(msg: T) {
    let msg = msg.as_ref();
    log::error!("{msg}");
    let tag = style("ERROR").for_stderr().red().bold();
    eprintln!("{tag} {msg}");
}

/// Write resolved positions, one per line.
pub(crate) fn write_positions(out: &mut impl Write, located: &Located) -> io::Result<()> {
    for pos in located.positions() {
        writeln!(out, "{pos}")?;
    }

    Ok(())
}

/// Write the size and flags of an index, one `key: value` per line.
pub(crate) fn write_info(out: &mut impl Write, index: &IntervalIndex) -> io::Result<()> {
    writeln!(out, "length: {}", index.len())?;
    match index.closed() {
        Some(closed) => writeln!(out, "closed: {closed}")?,
        None => writeln!(out, "closed: mixed")?,
    }
    writeln!(out, "overlapping: {}", index.is_overlapping())?;
    writeln!(out, "unique: {}", index.is_unique())?;
    writeln!(out, "monotonic: {}", index.is_monotonic_increasing())?;
    writeln!(out, "strategy: {}", index.strategy_name())?;

    Ok(())
}
