//! Geteilte, layer-neutrale Bausteine: Optionen und reine Geometrie.
//!
//! Wird von `app` (Hit-Tests, Tools, Overlay) genutzt, ohne selbst vom
//! App-Layer abzuhängen.

pub mod options;
pub mod polygon;
pub mod spline_geometry;
pub mod wire_geometry;

pub use options::WireToolsOptions;
pub use wire_geometry::{focus_taper, WireGeometry, WireQuad};
