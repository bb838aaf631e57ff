//! Structured tick reports. Each loop emits one JSON line per tick on the
//! metrics target; an external collector filters on the target name.

use log::{info, warn};
use serde::Serialize;

pub const METRICS_TARGET: &str = "barnyard::metrics";

pub fn emit<R: Serialize>(loop_name: &str, report: &R) {
    match serde_json::to_value(report) {
        Ok(serde_json::Value::Object(mut fields)) => {
            fields.insert(
                "loop".to_string(),
                serde_json::Value::String(loop_name.to_string()),
            );
            info!(target: METRICS_TARGET, "{}", serde_json::Value::Object(fields));
        }
        Ok(other) => {
            info!(target: METRICS_TARGET, "{{\"loop\":\"{loop_name}\",\"report\":{other}}}");
        }
        Err(err) => warn!("failed to serialize {loop_name} tick report: {err}"),
    }
}
