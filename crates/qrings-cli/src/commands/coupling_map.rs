//! Coupling-map command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use tracing::{info, warn};

use qrings_viz::{CouplingMapRenderer, RenderOptions};

use super::common::{Connection, open_session};

/// Qubit count assumed when `--num_qubits` is not given.
pub const DEFAULT_NUM_QUBITS: u32 = 128;

/// Execute the coupling-map command.
pub async fn execute(connection: &Connection, num_qubits: u32, output_dir: PathBuf) -> Result<()> {
    info!("Requested coupling map for {} qubits", num_qubits);

    let session = open_session(connection).await?;
    let backend = session.backend.as_ref();
    if backend.num_qubits() != num_qubits {
        warn!(
            "Backend {} reports {} qubits, not {}",
            backend.name(),
            backend.num_qubits(),
            num_qubits
        );
    }

    let renderer = CouplingMapRenderer::new(RenderOptions::default().with_output_dir(output_dir));
    let summary = renderer
        .render(backend)
        .context("Failed to render coupling map")?;

    println!(
        "\nCoupling map visualization saved as {}",
        style(summary.path.display()).cyan()
    );
    println!("Number of qubits: {}", summary.num_qubits);
    println!("Number of connections: {}", summary.num_edges);

    Ok(())
}
