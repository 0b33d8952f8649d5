//! Logging setup shared by every binary: an `EnvFilter`-driven fmt layer
//! plus an optional operator alert channel fed from `tracing` events.

mod config;
mod layer;
mod notifier;
mod webhook;

use anyhow::Result;
use config::ObservabilityConfig;
use layer::AlertLayer;
use notifier::{AlertSink, Notifier};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use webhook::ChatWebhookSink;

/// Must be called from inside a tokio runtime: the alert notifier spawns
/// its delivery task.
pub fn init_observability(component: &str) -> Result<()> {
    let mut config = ObservabilityConfig::from_env(component);

    let alert_layer = match config.alerts.clone() {
        Some(alerts) => match ChatWebhookSink::new(alerts.webhook_url) {
            Ok(sink) => {
                let sinks: Vec<Arc<dyn AlertSink>> = vec![Arc::new(sink)];
                Some(
                    AlertLayer::new(
                        Notifier::spawn(sinks),
                        config.service_context.clone(),
                        alerts.min_level,
                    )
                    .with_filter(LevelFilter::from_level(alerts.min_level)),
                )
            }
            Err(err) => {
                config
                    .warnings
                    .push(format!("operator alerts disabled: {err}"));
                config.alerts = None;
                None
            }
        },
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Local time, so a host TZ shows up as an offset instead of `Z`.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(alert_layer)
        .with(env_filter)
        .try_init()?;

    let context = &config.service_context;
    for warning in &config.warnings {
        warn!(
            service = %context.service_name,
            environment = %context.environment,
            component = %context.component,
            warning = %warning,
            "observability: config warning"
        );
    }

    info!(
        service = %context.service_name,
        environment = %context.environment,
        component = %context.component,
        operator_alerts = config.alerts.is_some(),
        "observability: tracing initialised"
    );

    Ok(())
}
