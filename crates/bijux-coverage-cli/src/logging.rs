use bijux_coverage_core::{env_bool, ENV_BIJUX_LOG_JSON, ENV_BIJUX_LOG_LEVEL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub(crate) fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(ENV_BIJUX_LOG_LEVEL).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = if env_bool(ENV_BIJUX_LOG_JSON, false) {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
}
