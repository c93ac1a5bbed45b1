//! Device registration command.

use super::{report, CliEngine};
use pushlink_protocol::DeviceToken;
use tracing::info;

/// Registers a hex-encoded device token.
pub fn run(
    engine: &CliEngine,
    token_hex: &str,
    instance_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = DeviceToken::from_hex(token_hex)?;
    info!("Registering {}-byte token for instance {}", token.as_bytes().len(), instance_id);

    let mut outcome = None;
    engine.register(&token, instance_id, |c| outcome = Some(c));

    let completion = outcome.ok_or("registration did not complete")?;
    report(completion)?;
    Ok(())
}
