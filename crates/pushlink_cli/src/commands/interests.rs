//! Subscription and interest commands.

use super::{report, CliEngine};
use pushlink_engine::{InterestManager, StatusCompletion};
use tracing::info;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn finish(outcome: Option<StatusCompletion>) -> CommandResult {
    let completion = outcome.ok_or("request did not complete")?;
    report(completion)?;
    Ok(())
}

/// Activates the device for delivery.
pub fn subscribe(engine: &CliEngine) -> CommandResult {
    let mut outcome = None;
    engine.subscribe(|c| outcome = Some(c));
    finish(outcome)
}

/// Replaces the interest set.
pub fn set(engine: &CliEngine, interests: &[String]) -> CommandResult {
    info!("Setting {} interest(s)", interests.len());
    let mut outcome = None;
    engine.set_interests(interests, |c| outcome = Some(c));
    finish(outcome)
}

/// Deactivates the device.
pub fn unsubscribe(engine: &CliEngine) -> CommandResult {
    let mut outcome = None;
    engine.unsubscribe(|c| outcome = Some(c));
    finish(outcome)
}

/// Clears every interest.
pub fn unsubscribe_all(engine: &CliEngine) -> CommandResult {
    let mut outcome = None;
    engine.unsubscribe_all(|c| outcome = Some(c));
    finish(outcome)
}
