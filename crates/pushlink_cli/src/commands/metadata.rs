//! Metadata sync command.

use super::{report, CliEngine};
use pushlink_store::MetadataStore;
use tracing::info;

/// Sends metadata if it changed since the last recorded sync.
pub fn sync(engine: &CliEngine) -> Result<(), Box<dyn std::error::Error>> {
    info!("Snapshot file: {:?}", engine.store().path());
    if let Some(previous) = engine.store().load()? {
        info!("Last synced {} attribute(s)", previous.len());
    }

    let mut outcome = None;
    engine.sync_metadata(|c| outcome = Some(c));

    report(outcome.ok_or("metadata sync did not complete")?)?;
    Ok(())
}
