use log::LevelFilter;
use tracing_subscriber::filter::LevelFilter as MaxLevel;

fn max_level(level: LevelFilter) -> MaxLevel {
    match level {
        LevelFilter::Off => MaxLevel::OFF,
        LevelFilter::Error => MaxLevel::ERROR,
        LevelFilter::Warn => MaxLevel::WARN,
        LevelFilter::Info => MaxLevel::INFO,
        LevelFilter::Debug => MaxLevel::DEBUG,
        LevelFilter::Trace => MaxLevel::TRACE,
    }
}

/// Sends `log` records to stderr so they never interleave with the board on stdout.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(max_level(level))
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
