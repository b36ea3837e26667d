//! Inspect command implementation.

use anyhow::{Context, Result};

use qrings_hal::inspect::print_report;

use super::common::{Connection, open_session};

/// Execute the inspect command.
pub async fn execute(connection: &Connection) -> Result<()> {
    let session = open_session(connection).await?;
    print_report(session.provider.as_ref(), session.backend.as_ref())
        .context("Failed to write report")
}
