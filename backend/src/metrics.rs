//! Prometheus counters
//!
//! The recorder is process-global; `install` is safe to call more than once
//! (tests build many routers) and always returns the same handle.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::warn;

static HANDLE: OnceCell<Option<PrometheusHandle>> = OnceCell::new();

/// Install the global recorder once. `None` if another recorder already owns the slot.
pub fn install() -> Option<&'static PrometheusHandle> {
    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Prometheus recorder not installed: {}", e);
                None
            }
        })
        .as_ref()
}

/// Render all counters in the Prometheus text format
pub fn render() -> String {
    install().map(|h| h.render()).unwrap_or_default()
}

/// complete / uncomplete / skip / adjust
pub fn plan_day_event(event: &'static str) {
    metrics::counter!("fitplan_plan_day_events_total", "event" => event).increment(1);
}

/// template / custom
pub fn plan_created(source: &'static str) {
    metrics::counter!("fitplan_plans_created_total", "source" => source).increment(1);
}

pub fn record_created() {
    metrics::counter!("fitplan_records_created_total").increment(1);
}

/// signup / login / login_failed / refresh
pub fn auth_event(event: &'static str) {
    metrics::counter!("fitplan_auth_events_total", "event" => event).increment(1);
}
