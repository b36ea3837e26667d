//! Coupling-map image rendering.
//!
//! The drawing is assembled as an SVG scene in typographic points, then
//! rasterized with resvg at the requested DPI and written as PNG.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;
use resvg::usvg::fontdb;
use svg::Document;
use svg::node::element::{Circle, Line, Polygon, Rectangle, Text};
use tracing::{debug, info, warn};

use qrings_hal::Backend;

use crate::error::{RenderError, RenderResult};
use crate::graph::CouplingGraph;
use crate::layout::{Bounds, GridLayout};

/// Points per inch.
const PT_PER_INCH: f64 = 72.0;

/// Marker area in pt², as a scatter-plot marker size.
const NODE_AREA: f64 = 500.0;
const NODE_COLOR: &str = "lightblue";
const LABEL_SIZE: f64 = 8.0;

const EDGE_WIDTH: f64 = 0.5;
const EDGE_COLOR: &str = "black";
/// Arrow mutation scale; head length and half-width derive from it.
const ARROW_SIZE: f64 = 10.0;

const TITLE_SIZE: f64 = 12.0;
const TITLE_PAD: f64 = 20.0;
const LINE_SPACING: f64 = 1.2;

/// Axes box as fractions of the figure: left, right, top, bottom (y-down).
const AXES_BOX: (f64, f64, f64, f64) = (0.125, 0.9, 0.12, 0.89);

/// Family shipped with the crate; every label and title uses it.
const FONT_FAMILY: &str = "DejaVu Sans";

const BUNDLED_FONTS: [&[u8]; 2] = [
    include_bytes!("../assets/fonts/DejaVuSans.ttf"),
    include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf"),
];

/// Rendering settings.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Directory the image is written to. Created if missing.
    pub output_dir: PathBuf,
    /// Side length of the square figure.
    pub figure_inches: f64,
    /// Output resolution.
    pub dpi: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("images"),
            figure_inches: 12.0,
            dpi: 300,
        }
    }
}

impl RenderOptions {
    /// Write into `dir` instead of `images`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Change the figure size.
    pub fn with_figure_inches(mut self, inches: f64) -> Self {
        self.figure_inches = inches;
        self
    }

    /// Change the output resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Figure side in points.
    fn figure_pt(&self) -> f64 {
        self.figure_inches * PT_PER_INCH
    }

    /// Figure side in pixels.
    fn figure_px(&self) -> u32 {
        (self.figure_inches * f64::from(self.dpi)).round() as u32
    }
}

/// What a render produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// Path of the written PNG.
    pub path: PathBuf,
    /// Qubit count reported by the backend.
    pub num_qubits: u32,
    /// Raw number of coupling pairs, duplicates included.
    pub num_edges: usize,
}

/// Draws a backend's coupling map to a PNG file.
#[derive(Debug, Clone, Default)]
pub struct CouplingMapRenderer {
    options: RenderOptions,
}

impl CouplingMapRenderer {
    /// Create a renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// The active options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// File name for a backend: `coupling_map_{num_qubits}q_{name}.png`.
    pub fn file_name(backend: &dyn Backend) -> String {
        let name: String = backend
            .name()
            .chars()
            .map(|c| if std::path::is_separator(c) { '_' } else { c })
            .collect();
        format!("coupling_map_{}q_{}.png", backend.num_qubits(), name)
    }

    /// Full output path for a backend.
    pub fn output_path(&self, backend: &dyn Backend) -> PathBuf {
        self.options.output_dir.join(Self::file_name(backend))
    }

    /// Render `backend`'s coupling map and write it to disk.
    pub fn render(&self, backend: &dyn Backend) -> RenderResult<RenderSummary> {
        let coupling_map = backend.coupling_map();
        let num_qubits = backend.num_qubits();

        let stray = coupling_map.out_of_range(num_qubits);
        if !stray.is_empty() {
            warn!(
                "{} coupling pairs reference qubits outside [0, {}): {:?}",
                stray.len(),
                num_qubits,
                stray
            );
        }

        let document = self.scene(backend);
        let pixmap = self.rasterize(&document.to_string())?;

        let dir = &self.options.output_dir;
        fs::create_dir_all(dir).map_err(|source| RenderError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let path = self.output_path(backend);
        write_png(&path, &pixmap, self.options.dpi)?;
        info!("Wrote {}", path.display());

        Ok(RenderSummary {
            path,
            num_qubits,
            num_edges: coupling_map.len(),
        })
    }

    /// Build the SVG scene for `backend`.
    pub fn scene(&self, backend: &dyn Backend) -> Document {
        let graph = CouplingGraph::from_coupling_map(backend.coupling_map());
        let layout = GridLayout::for_graph(&graph);
        debug!(
            "Laying out {} nodes, {} edges on a {}x{} grid",
            graph.node_count(),
            graph.edge_count(),
            layout.grid_size(),
            layout.grid_size()
        );

        let side = self.options.figure_pt();
        let px = self.options.figure_px();
        let frame = Frame::fit(layout.padded_bounds(), side);

        let mut doc = Document::new()
            .set("width", px)
            .set("height", px)
            .set("viewBox", (0.0, 0.0, side, side))
            .add(
                Rectangle::new()
                    .set("width", side)
                    .set("height", side)
                    .set("fill", "white"),
            );

        let radius = NODE_AREA.sqrt() / 2.0;
        for (source, target) in graph.edges() {
            let (Some(a), Some(b)) = (layout.position(source), layout.position(target)) else {
                continue;
            };
            if let Some((shaft, head)) = arrow(frame.project(a), frame.project(b), radius) {
                doc = doc.add(shaft).add(head);
            }
        }

        for (qubit, pos) in layout.positions() {
            let (cx, cy) = frame.project(pos);
            doc = doc
                .add(
                    Circle::new()
                        .set("cx", cx)
                        .set("cy", cy)
                        .set("r", radius)
                        .set("fill", NODE_COLOR),
                )
                .add(
                    Text::new(qubit.to_string())
                        .set("x", cx)
                        .set("y", cy)
                        .set("font-family", FONT_FAMILY)
                        .set("font-size", LABEL_SIZE)
                        .set("font-weight", "bold")
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "central"),
                );
        }

        let title = [
            format!("QuantumRings Coupling Map - {} Qubits", backend.num_qubits()),
            format!("{} v{}", backend.name(), backend.backend_version()),
        ];
        let baseline = frame.top - TITLE_PAD;
        let leading = TITLE_SIZE * LINE_SPACING;
        for (i, line) in title.iter().enumerate() {
            let y = baseline - leading * (title.len() - 1 - i) as f64;
            doc = doc.add(
                Text::new(line.as_str())
                    .set("x", frame.center_x())
                    .set("y", y)
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", TITLE_SIZE)
                    .set("text-anchor", "middle"),
            );
        }

        doc
    }

    fn rasterize(&self, scene: &str) -> RenderResult<Pixmap> {
        let mut opt = usvg::Options::default();
        opt.font_family = FONT_FAMILY.to_string();
        load_fonts(opt.fontdb_mut());
        let tree = usvg::Tree::from_str(scene, &opt)?;

        let size = tree.size().to_int_size();
        let (width, height) = (size.width(), size.height());
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })?;
        pixmap.fill(Color::WHITE);
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
        Ok(pixmap)
    }
}

/// Fill `db` with the bundled faces plus whatever the host provides.
/// Generic families resolve to the bundled face so labels never depend on
/// the host.
fn load_fonts(db: &mut fontdb::Database) {
    for data in BUNDLED_FONTS {
        db.load_font_data(data.to_vec());
    }
    db.load_system_fonts();
    db.set_sans_serif_family(FONT_FAMILY);
    db.set_serif_family(FONT_FAMILY);

    let query = fontdb::Query {
        families: &[fontdb::Family::Name(FONT_FAMILY)],
        weight: fontdb::Weight::BOLD,
        ..fontdb::Query::default()
    };
    if db.query(&query).is_none() {
        warn!("No face for {}; labels will be missing", FONT_FAMILY);
    }
}

/// Maps layout coordinates into the figure, keeping equal aspect.
#[derive(Debug, Clone, Copy)]
struct Frame {
    bounds: Bounds,
    scale: f64,
    left: f64,
    top: f64,
    width: f64,
}

impl Frame {
    fn fit(bounds: Bounds, side: f64) -> Self {
        let (l, r, t, b) = AXES_BOX;
        let box_w = (r - l) * side;
        let box_h = (b - t) * side;
        let scale = (box_w / bounds.width()).min(box_h / bounds.height());
        let width = bounds.width() * scale;
        let height = bounds.height() * scale;
        Self {
            bounds,
            scale,
            left: l * side + (box_w - width) / 2.0,
            top: t * side + (box_h - height) / 2.0,
            width,
        }
    }

    fn project(&self, (x, y): (i64, i64)) -> (f64, f64) {
        (
            self.left + (x as f64 - self.bounds.x_min) * self.scale,
            self.top + (self.bounds.y_max - y as f64) * self.scale,
        )
    }

    fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Directed edge from `a` to `b`, clipped to circles of `radius`.
fn arrow(a: (f64, f64), b: (f64, f64), radius: f64) -> Option<(Line, Polygon)> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let dist = dx.hypot(dy);
    if dist <= 2.0 * radius {
        return None;
    }
    let (ux, uy) = (dx / dist, dy / dist);
    let start = (a.0 + ux * radius, a.1 + uy * radius);
    let tip = (b.0 - ux * radius, b.1 - uy * radius);

    let head_len = 0.4 * ARROW_SIZE;
    let half_w = 0.2 * ARROW_SIZE;
    let base = (tip.0 - ux * head_len, tip.1 - uy * head_len);
    let (nx, ny) = (-uy * half_w, ux * half_w);

    let shaft = Line::new()
        .set("x1", start.0)
        .set("y1", start.1)
        .set("x2", base.0)
        .set("y2", base.1)
        .set("stroke", EDGE_COLOR)
        .set("stroke-width", EDGE_WIDTH);
    let head = Polygon::new()
        .set(
            "points",
            format!(
                "{},{} {},{} {},{}",
                tip.0,
                tip.1,
                base.0 + nx,
                base.1 + ny,
                base.0 - nx,
                base.1 - ny
            ),
        )
        .set("fill", EDGE_COLOR);

    Some((shaft, head))
}

fn write_png(path: &Path, pixmap: &Pixmap, dpi: u32) -> RenderResult<()> {
    let file = File::create(path).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let per_meter = (f64::from(dpi) / 0.0254).round() as u32;
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: per_meter,
        yppu: per_meter,
        unit: png::Unit::Meter,
    }));

    // Opaque background, so premultiplied and straight alpha agree.
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(pixmap.data())?;
    png_writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrings_hal::BackendProperties;
    use std::fmt;

    struct StubBackend(BackendProperties);

    impl fmt::Display for StubBackend {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "StubBackend({})", self.0.name)
        }
    }

    impl Backend for StubBackend {
        fn properties(&self) -> &BackendProperties {
            &self.0
        }
    }

    fn small_options(dir: &Path) -> RenderOptions {
        RenderOptions::default()
            .with_output_dir(dir)
            .with_figure_inches(1.0)
            .with_dpi(64)
    }

    fn triangle() -> StubBackend {
        StubBackend(
            BackendProperties::new("scarlet_quantum_rings", "0.9.0", 3)
                .with_coupling_map(vec![(0, 1), (1, 0), (0, 2), (2, 0)]),
        )
    }

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert_eq!(opts.output_dir, PathBuf::from("images"));
        assert_eq!(opts.figure_px(), 3600);
        assert_eq!(opts.figure_pt(), 864.0);
    }

    #[test]
    fn test_file_name() {
        let backend = StubBackend(BackendProperties::new("scarlet_quantum_rings", "0.9.0", 128));
        assert_eq!(
            CouplingMapRenderer::file_name(&backend),
            "coupling_map_128q_scarlet_quantum_rings.png"
        );
    }

    #[test]
    fn test_scene_contents() {
        let renderer = CouplingMapRenderer::new(RenderOptions::default());
        let scene = renderer.scene(&triangle()).to_string();

        assert_eq!(scene.matches("<circle").count(), 3);
        assert_eq!(scene.matches("<line").count(), 4);
        assert_eq!(scene.matches("<polygon").count(), 4);
        assert!(scene.contains("QuantumRings Coupling Map - 3 Qubits"));
        assert!(scene.contains("scarlet_quantum_rings v0.9.0"));
        assert!(scene.contains("fill=\"lightblue\""));
    }

    #[test]
    fn test_bundled_fonts_resolve_without_host_fonts() {
        let mut db = fontdb::Database::new();
        for data in BUNDLED_FONTS {
            db.load_font_data(data.to_vec());
        }
        db.set_sans_serif_family(FONT_FAMILY);

        for weight in [fontdb::Weight::NORMAL, fontdb::Weight::BOLD] {
            let query = fontdb::Query {
                families: &[fontdb::Family::Name(FONT_FAMILY)],
                weight,
                ..fontdb::Query::default()
            };
            let id = db.query(&query).expect("bundled face");
            assert_eq!(db.face(id).unwrap().weight, weight);
        }

        let generic = fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..fontdb::Query::default()
        };
        assert!(db.query(&generic).is_some());
    }

    #[test]
    fn test_labels_survive_rasterization() {
        let renderer = CouplingMapRenderer::new(
            RenderOptions::default().with_figure_inches(1.0).with_dpi(72),
        );
        let backend = StubBackend(
            BackendProperties::new("l", "1", 1).with_coupling_map(vec![(0, 0)]),
        );
        let mut opt = usvg::Options::default();
        opt.font_family = FONT_FAMILY.to_string();
        load_fonts(opt.fontdb_mut());
        let tree = usvg::Tree::from_str(&renderer.scene(&backend).to_string(), &opt).unwrap();

        fn count_text(group: &usvg::Group) -> usize {
            group
                .children()
                .iter()
                .map(|node| match node {
                    usvg::Node::Text(_) => 1,
                    usvg::Node::Group(g) => count_text(g),
                    _ => 0,
                })
                .sum()
        }
        // One label plus two title lines.
        assert_eq!(count_text(tree.root()), 3);
    }

    #[test]
    fn test_arrow_is_clipped_to_nodes() {
        let (shaft, head) = arrow((0.0, 0.0), (100.0, 0.0), 10.0).unwrap();
        assert!(shaft.to_string().contains("x1=\"10\""));
        assert!(head.to_string().contains("90,0"));

        assert!(arrow((0.0, 0.0), (0.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("images");
        let renderer = CouplingMapRenderer::new(small_options(&out));

        let summary = renderer.render(&triangle()).unwrap();
        assert_eq!(summary.path, out.join("coupling_map_3q_scarlet_quantum_rings.png"));
        assert_eq!(summary.num_qubits, 3);
        assert_eq!(summary.num_edges, 4);

        let bytes = fs::read(&summary.path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoder = png::Decoder::new(bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        assert_eq!((reader.info().width, reader.info().height), (64, 64));
    }

    #[test]
    fn test_render_empty_coupling_map() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = CouplingMapRenderer::new(small_options(dir.path()));
        let backend = StubBackend(BackendProperties::new("empty", "1.0", 0));

        let summary = renderer.render(&backend).unwrap();
        assert_eq!(summary.num_edges, 0);
        assert!(summary.path.exists());
    }

    #[test]
    fn test_render_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = CouplingMapRenderer::new(small_options(dir.path()));

        let first = renderer.render(&triangle()).unwrap();
        let second = renderer.render(&triangle()).unwrap();
        assert_eq!(first.path, second.path);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_out_of_range_pairs_still_render() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = CouplingMapRenderer::new(small_options(dir.path()));
        let backend = StubBackend(
            BackendProperties::new("odd", "1.0", 2).with_coupling_map(vec![(0, 1), (1, 5)]),
        );
        let summary = renderer.render(&backend).unwrap();
        assert_eq!(summary.num_edges, 2);
    }

    #[test]
    fn test_unwritable_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        let renderer = CouplingMapRenderer::new(small_options(&blocker.join("images")));

        let err = renderer.render(&triangle()).unwrap_err();
        assert!(matches!(err, RenderError::CreateDir { .. }));
    }
}
