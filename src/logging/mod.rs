use tracing::Level;
use tracing_subscriber::Layer;
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

const CRATE_TARGET: &str = "devicegate";

fn is_own_target(target: &str) -> bool {
    target == CRATE_TARGET || target.starts_with("devicegate::")
}

pub fn registry_logs(level: Level) -> anyhow::Result<()> {
    let app_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(filter::LevelFilter::from_level(level))
        .with_filter(filter::filter_fn(|metadata| {
            is_own_target(metadata.target())
        }));
    let http_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_file(false)
        .with_target(false)
        .with_filter(filter::LevelFilter::from_level(level))
        .with_filter(filter::filter_fn(|metadata| {
            metadata.target().starts_with("tower_http")
        }));
    let general_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_filter(filter::LevelFilter::INFO)
        .with_filter(filter::filter_fn(|metadata| {
            !is_own_target(metadata.target()) && !metadata.target().starts_with("tower_http")
        }));
    tracing_subscriber::registry()
        .with(app_layer)
        .with(http_layer)
        .with(general_layer)
        .with(tracing_error::ErrorLayer::default())
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_own_target() {
        assert!(is_own_target("devicegate"));
        assert!(is_own_target("devicegate::services::policy"));
        assert!(!is_own_target("devicegate_other"));
        assert!(!is_own_target("sqlx::query"));
    }
}
