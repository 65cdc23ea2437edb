//! Nodes des Graphen: Komponenten mit Port-Listen oder eigenständige Parameter.

use super::{PortId, Rect};

/// Node-ID
pub type NodeId = u64;

/// Art eines Nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Komponente mit geordneten Ein- und Ausgängen (Deklarationsreihenfolge)
    Component {
        inputs: Vec<PortId>,
        outputs: Vec<PortId>,
    },
    /// Eigenständiger Parameter: der Node ist selbst genau ein Port
    Parameter { port: PortId },
}

/// Ein Node auf dem Canvas
#[derive(Debug, Clone)]
pub struct Node {
    /// Eindeutige Node-ID
    pub id: NodeId,
    /// Anzeigename
    pub name: String,
    /// Umriss auf dem Canvas (für Drag-Hit-Tests)
    pub bounds: Rect,
    /// Komponente oder Parameter
    pub kind: NodeKind,
}

impl Node {
    /// Erstellt eine Komponente ohne Ports.
    pub fn component(id: NodeId, name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id,
            name: name.into(),
            bounds,
            kind: NodeKind::Component {
                inputs: Vec::new(),
                outputs: Vec::new(),
            },
        }
    }

    /// Erstellt einen eigenständigen Parameter-Node.
    pub fn parameter(id: NodeId, name: impl Into<String>, bounds: Rect, port: PortId) -> Self {
        Self {
            id,
            name: name.into(),
            bounds,
            kind: NodeKind::Parameter { port },
        }
    }

    /// Eingänge in Deklarationsreihenfolge.
    pub fn inputs(&self) -> &[PortId] {
        match &self.kind {
            NodeKind::Component { inputs, .. } => inputs,
            NodeKind::Parameter { port } => std::slice::from_ref(port),
        }
    }

    /// Ausgänge in Deklarationsreihenfolge.
    pub fn outputs(&self) -> &[PortId] {
        match &self.kind {
            NodeKind::Component { outputs, .. } => outputs,
            NodeKind::Parameter { port } => std::slice::from_ref(port),
        }
    }

    /// Gibt den Port zurück, falls der Node ein eigenständiger Parameter ist.
    pub fn as_parameter(&self) -> Option<PortId> {
        match self.kind {
            NodeKind::Parameter { port } => Some(port),
            NodeKind::Component { .. } => None,
        }
    }
}
