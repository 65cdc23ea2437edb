//! Application-Layer: Wire-Katalog, Hit-Tests, Transaktionen, Tools und Editor-Fassade.

pub mod catalog;
pub mod edit_log;
pub mod editor;
pub mod history;
pub mod overlay;
/// Gesten-Handler (Knife, AutoWire) und ihre Kette
pub mod tools;
pub mod transaction;

pub use catalog::{enumerate_visible, is_visible, VisibilityRules, WireCatalog};
pub use edit_log::{EditGroup, EditLog};
pub use editor::WireEditor;
pub use history::{EditHistory, Snapshot};
pub use overlay::{paint_guarded, OverlayItem, OverlayPainter, OverlayScene, OverlayWireRole};
pub use tools::{
    AutoWireTool, GestureHandler, GesturePhase, HandlerChain, HandlerResponse, InputEvent, Key,
    KnifeTool,
};
pub use transaction::{CommitOutcome, EditError, EditNotifier, EditTransaction, WireEdit};
