//! Event tracking command.

use super::{report, CliEngine};
use pushlink_protocol::EventType;

/// Reports an event for a notification payload given as JSON text.
pub fn run(
    engine: &CliEngine,
    payload: &str,
    event_type: EventType,
    device_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload: serde_json::Value = serde_json::from_str(payload)?;

    let mut outcome = None;
    engine.track(&payload, event_type, device_id, |c| outcome = Some(c));

    report(outcome.ok_or("tracking did not complete")?)?;
    Ok(())
}
