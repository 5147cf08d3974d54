use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError};

const DEFAULT_FILTER: &str = "blog_app=debug,blog_core=debug";

/// Installs a fmt subscriber filtered by `RUST_LOG`, falling back to debug
/// output for this workspace's crates. Fails if a global subscriber is
/// already set.
pub fn install_tracing() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        let _ = install_tracing();
        assert!(install_tracing().is_err());
    }
}
