use crate::error::ArcbenchError;
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Compose the env filter and a formatting layer into a subscriber.
///
/// `RUST_LOG` wins over `env_filter` when set.
/// Events go to stderr, stdout is reserved for the benchmark data.
pub fn get_subscriber(env_filter: impl AsRef<str>) -> impl Subscriber + Sync + Send {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    Registry::default().with(env_filter).with(formatting_layer)
}

/// Register a subscriber as global default.
///
/// It should be only called once!
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> Result<(), ArcbenchError> {
    set_global_default(subscriber)?;
    Ok(())
}

/// Default filter for the apps, raised to debug by the verbose flag.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}
