//! Coupling-map visualization for qrings.
//!
//! Turns a backend's coupling map into a directed graph, places its qubits
//! on a square grid, and writes the drawing as a PNG.
//!
//! # Example
//!
//! ```ignore
//! use qrings_viz::{CouplingMapRenderer, RenderOptions};
//!
//! let renderer = CouplingMapRenderer::new(RenderOptions::default());
//! let summary = renderer.render(session.backend.as_ref())?;
//! println!("saved {}", summary.path.display());
//! ```

pub mod error;
pub mod graph;
pub mod layout;
pub mod render;

pub use error::{RenderError, RenderResult};
pub use graph::CouplingGraph;
pub use layout::{Bounds, GridLayout, grid_size};
pub use render::{CouplingMapRenderer, RenderOptions, RenderSummary};
