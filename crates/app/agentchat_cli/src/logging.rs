pub mod formats;

use flexi_logger::Logger;

use crate::Error;

/// Log to stderr so the transcript on stdout stays clean.
pub fn init() -> Result<(), Error> {
    Logger::try_with_env_or_str("warn")?
        .format(formats::cli_format)
        .log_to_stderr()
        .start()?;

    Ok(())
}
