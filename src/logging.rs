//! Log output setup shared by the binary, the tests and the benches.

use std::io::Write;

use flexi_logger::{DeferredNow, FlexiLoggerError, Logger};
use log::Record;

/// `HH:MM:SS [L] message`, with the level letter colored.
pub fn format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    let style = flexi_logger::style(record.level());
    write!(
        w,
        "{} {pref}[{}] {}{suf}",
        now.format("%H:%M:%S"),
        &record.level().as_str()[0..1],
        record.args(),
        pref = style.prefix(),
        suf = style.suffix(),
    )
}

/// Logger reading `RUST_LOG`, falling back to `spec`. Callers pick the output and start it.
pub fn logger(spec: &str) -> Result<Logger, FlexiLoggerError> {
    Ok(Logger::try_with_env_or_str(spec)?
        .set_palette("196;208;3;7;8".to_owned())
        .format(format))
}
