//! Wire-Tools Library.
//! Kurven-Geometrie, Hit-Tests, Auto-Wire und Knife-Schnitt für Node-Graph-Canvases.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    CommitOutcome, EditError, EditLog, EditNotifier, HandlerResponse, InputEvent, Key, WireCatalog,
    WireEditor,
};
pub use core::{Connection, Graph, Node, NodeId, Port, PortDirection, PortId, Rect, Viewport};
pub use shared::{WireGeometry, WireToolsOptions};
