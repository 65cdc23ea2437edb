//! Repräsentiert eine Verbindung (Wire) zwischen einem Ausgang und einem Eingang.

use super::{DataShape, PortId};

/// Gerichtete Verbindung Quelle (Output) → Ziel (Input).
///
/// Hält nur die Port-IDs; die Kurve wird bei jeder Abfrage aus den
/// aktuellen Ankern neu berechnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Quell-Port (liefert Daten)
    pub source: PortId,
    /// Ziel-Port (empfängt Daten)
    pub target: PortId,
}

impl Connection {
    pub fn new(source: PortId, target: PortId) -> Self {
        Self { source, target }
    }
}

/// Darstellungsklasse eines Wires, abgeleitet aus den Live-Daten der Quelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    /// Keine Daten, Wire wird nicht gezeichnet
    Null,
    /// Genau ein Item in einem Branch (breitester Strich)
    Item,
    /// Ein Branch mit mehreren Items (dünnster Strich)
    List,
    /// Mehrere Branches (mittlere Stärke)
    Tree,
}

impl WireType {
    /// Bestimmt die Klasse aus der Datenform des Quell-Ports.
    pub fn from_data(data: &DataShape) -> Self {
        match data.branches.as_slice() {
            [] => WireType::Null,
            [0] => WireType::Null,
            [1] => WireType::Item,
            [_] => WireType::List,
            _ => WireType::Tree,
        }
    }

    /// Ist der Wire sichtbar?
    pub fn is_drawn(self) -> bool {
        self != WireType::Null
    }
}
