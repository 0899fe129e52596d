use crate::config::LoggingConfig;
use std::time::Instant;

/// Install the global logger: stderr plus an optional file, at the configured level
pub fn init(config: &LoggingConfig) -> Result<(), fern::InitError> {
    let start = Instant::now();
    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{:8.3}s {:5} {}] {}",
                start.elapsed().as_secs_f32(),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.level_filter())
        .chain(std::io::stderr());

    if let Some(path) = &config.file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
