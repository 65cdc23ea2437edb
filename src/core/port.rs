//! Ports: typisierte Anschlusspunkte eines Nodes.

use glam::Vec2;

use super::TypeName;

/// Stabile Port-ID (überlebt jede Anker-Bewegung).
pub type PortId = u64;

/// Richtung eines Ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    /// Eingang (hat nur einen Input-Grip)
    Input,
    /// Ausgang (hat nur einen Output-Grip)
    Output,
    /// Eigenständiger Parameter mit Input- und Output-Grip
    Bidirectional,
}

impl PortDirection {
    /// Kann dieser Port Quellen aufnehmen?
    pub fn has_input_grip(self) -> bool {
        matches!(self, PortDirection::Input | PortDirection::Bidirectional)
    }

    /// Kann dieser Port Empfänger speisen?
    pub fn has_output_grip(self) -> bool {
        matches!(self, PortDirection::Output | PortDirection::Bidirectional)
    }
}

/// Fähigkeits-Flags eines Ports.
///
/// Generische, Geometrie- und Passthrough-Ports wirken beim Auto-Wire als
/// Wildcard auf beiden Seiten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortCapabilities {
    /// Akzeptiert beliebige Werte (generischer Parameter)
    pub accepts_any: bool,
    /// Geometrie-typisierter Port
    pub is_geometry: bool,
    /// Label/Panel, reicht Daten unverändert durch
    pub is_passthrough: bool,
    /// Port ist selbst ein ganzer Node (Top-Level-Parameter)
    pub is_top_level: bool,
}

impl PortCapabilities {
    /// Wirkt der Port als Typ-Wildcard?
    pub fn is_wildcard(&self) -> bool {
        self.accepts_any || self.is_geometry || self.is_passthrough
    }
}

/// Form der aktuell anliegenden Daten: Anzahl Items pro Branch.
///
/// Leerer Vec = keine Daten.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataShape {
    pub branches: Vec<usize>,
}

impl DataShape {
    /// Keine Daten.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ein einzelnes Item in einem Branch.
    pub fn item() -> Self {
        Self { branches: vec![1] }
    }

    /// Ein Branch mit `count` Items.
    pub fn list(count: usize) -> Self {
        Self {
            branches: vec![count],
        }
    }

    /// Mehrere Branches mit den angegebenen Item-Anzahlen.
    pub fn tree(branches: Vec<usize>) -> Self {
        Self { branches }
    }
}

/// Ein Port mit Identität, Typ, Flags und aktuellem Anker
#[derive(Debug, Clone)]
pub struct Port {
    /// Eindeutige Port-ID
    pub id: PortId,
    /// ID des besitzenden Nodes
    pub node_id: u64,
    /// Anzeigename
    pub name: String,
    /// Richtung
    pub direction: PortDirection,
    /// Deklarierter Werte-Typ
    pub value_type: TypeName,
    /// Fähigkeits-Flags
    pub capabilities: PortCapabilities,
    /// Canvas-Position, an der eingehende Wires andocken
    pub input_grip: Vec2,
    /// Canvas-Position, an der ausgehende Wires starten
    pub output_grip: Vec2,
    /// Form der zuletzt berechneten Daten (bestimmt die Wire-Stärke)
    pub data: DataShape,
}

impl Port {
    /// Erstellt einen neuen Port; beide Grips liegen auf `anchor`.
    pub fn new(
        id: PortId,
        node_id: u64,
        direction: PortDirection,
        value_type: impl Into<TypeName>,
        anchor: Vec2,
    ) -> Self {
        Self {
            id,
            node_id,
            name: String::new(),
            direction,
            value_type: value_type.into(),
            capabilities: PortCapabilities::default(),
            input_grip: anchor,
            output_grip: anchor,
            data: DataShape::empty(),
        }
    }

    /// Setzt den Anzeigenamen.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Setzt die Fähigkeits-Flags.
    pub fn with_capabilities(mut self, capabilities: PortCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Setzt Input- und Output-Grip getrennt (eigenständige Parameter).
    pub fn with_grips(mut self, input_grip: Vec2, output_grip: Vec2) -> Self {
        self.input_grip = input_grip;
        self.output_grip = output_grip;
        self
    }

    /// Setzt die anliegende Datenform.
    pub fn with_data(mut self, data: DataShape) -> Self {
        self.data = data;
        self
    }

    /// Verschiebt beide Grips um `delta` (Pan, Node-Drag).
    pub fn translate(&mut self, delta: Vec2) {
        self.input_grip += delta;
        self.output_grip += delta;
    }

    pub fn has_input_grip(&self) -> bool {
        self.direction.has_input_grip()
    }

    pub fn has_output_grip(&self) -> bool {
        self.direction.has_output_grip()
    }
}
