//! Core-Domänentypen: Ports, Nodes, Graph, Verbindungen und Viewport.

pub mod connection;
pub mod graph;
pub mod node;
pub mod port;
pub mod types;
pub mod viewport;

pub use connection::{Connection, WireType};
pub use graph::Graph;
pub use node::{Node, NodeId, NodeKind};
pub use port::{DataShape, Port, PortCapabilities, PortDirection, PortId};
pub use types::{TypeHierarchy, TypeName};
pub use viewport::{Rect, Viewport};
