//! Stderr logging for the `hid` binary.

use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// The filter from `--log`, else `RUST_LOG`, else warnings only.
pub fn standard_filter(
    directives: Option<&str>,
) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    match directives {
        Some(d) => EnvFilter::try_new(d),
        None => match std::env::var("RUST_LOG") {
            Ok(_) => Ok(EnvFilter::from_default_env()),
            Err(_) => EnvFilter::try_new("warn"),
        },
    }
}

/// Install a stderr fmt subscriber. Calling it twice is harmless.
pub fn init_fmt(directives: Option<&str>) -> anyhow::Result<()> {
    let filter = standard_filter(directives)?;
    Registry::default()
        .with(
            fmt::Layer::default()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .try_init()
        .ok();
    Ok(())
}
