//! Die zentrale Graph-Datenstruktur mit Nodes, Ports und Wire-Kanten.

use super::{Connection, DataShape, Node, NodeId, NodeKind, Port, PortId, Rect, TypeHierarchy};
use glam::Vec2;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Container für den gesamten Node-Graphen eines Dokuments.
///
/// Kanten werden doppelt geführt (Quellen pro Eingang, Empfänger pro
/// Ausgang); beide Sichten werden ausschließlich über die Mutations-Methoden
/// dieses Typs verändert und bleiben dadurch konsistent.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Alle Nodes in Einfüge-Reihenfolge
    nodes: IndexMap<NodeId, Node>,
    /// Alle Ports, indexiert nach ID
    ports: HashMap<PortId, Port>,
    /// Aufgezeichnete Quellen pro Eingang (Reihenfolge = Verbindungsreihenfolge)
    sources: HashMap<PortId, Vec<PortId>>,
    /// Empfänger pro Ausgang
    recipients: HashMap<PortId, Vec<PortId>>,
    /// Typ-Hierarchie für Zuweisbarkeits-Prüfungen
    pub types: TypeHierarchy,
}

impl Graph {
    /// Erstellt einen leeren Graphen
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt einen leeren Graphen mit vorgegebener Typ-Hierarchie
    pub fn with_types(types: TypeHierarchy) -> Self {
        Self {
            types,
            ..Self::default()
        }
    }

    // ── Nodes & Ports ───────────────────────────────────────────────

    /// Fügt eine Komponente hinzu. Ports werden in Deklarationsreihenfolge
    /// registriert; ihr `node_id` wird auf die Komponente gesetzt.
    pub fn add_component(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        bounds: Rect,
        ports: Vec<Port>,
    ) -> bool {
        if self.nodes.contains_key(&id) {
            log::warn!("Node {} existiert bereits", id);
            return false;
        }
        if let Some(dup) = ports.iter().find(|p| self.ports.contains_key(&p.id)) {
            log::warn!("Port {} existiert bereits, Node {} nicht angelegt", dup.id, id);
            return false;
        }
        let mut declared = IndexSet::with_capacity(ports.len());
        if let Some(dup) = ports.iter().find(|p| !declared.insert(p.id)) {
            log::warn!("Port {} doppelt deklariert, Node {} nicht angelegt", dup.id, id);
            return false;
        }

        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        for mut port in ports {
            port.node_id = id;
            if port.has_input_grip() {
                inputs.push(port.id);
            }
            if port.has_output_grip() {
                outputs.push(port.id);
            }
            self.ports.insert(port.id, port);
        }

        let mut node = Node::component(id, name, bounds);
        node.kind = NodeKind::Component { inputs, outputs };
        self.nodes.insert(id, node);
        true
    }

    /// Fügt einen eigenständigen Parameter hinzu (Node = genau ein Port).
    pub fn add_parameter(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        bounds: Rect,
        mut port: Port,
    ) -> bool {
        if self.nodes.contains_key(&id) || self.ports.contains_key(&port.id) {
            log::warn!("Parameter {} / Port {} existiert bereits", id, port.id);
            return false;
        }
        port.node_id = id;
        port.capabilities.is_top_level = true;
        let port_id = port.id;
        self.ports.insert(port_id, port);
        self.nodes.insert(id, Node::parameter(id, name, bounds, port_id));
        true
    }

    /// Entfernt einen Node inklusive aller Ports und betroffenen Kanten
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let node = self.nodes.shift_remove(&node_id)?;
        for port_id in port_ids_of(&node) {
            self.remove_all_sources(port_id);
            for recipient in self.recipients(port_id).to_vec() {
                self.remove_source(recipient, port_id);
            }
            self.sources.remove(&port_id);
            self.recipients.remove(&port_id);
            self.ports.remove(&port_id);
        }
        Some(node)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(&id)
    }

    pub fn port_mut(&mut self, id: PortId) -> Option<&mut Port> {
        self.ports.get_mut(&id)
    }

    /// Iterator über alle Nodes in Einfüge-Reihenfolge.
    pub fn nodes_iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Verschiebt einen Node samt aller Port-Anker (Drag, Layout).
    pub fn translate_node(&mut self, node_id: NodeId, delta: Vec2) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        node.bounds.min += delta;
        node.bounds.max += delta;

        for port_id in port_ids_of(node) {
            if let Some(port) = self.ports.get_mut(&port_id) {
                port.translate(delta);
            }
        }
        true
    }

    /// Aktualisiert die Live-Datenform eines Ports (nach einer Neuberechnung).
    pub fn set_port_data(&mut self, port_id: PortId, data: DataShape) -> bool {
        match self.ports.get_mut(&port_id) {
            Some(port) => {
                port.data = data;
                true
            }
            None => false,
        }
    }

    // ── Kanten ──────────────────────────────────────────────────────

    /// Aufgezeichnete Quellen eines Eingangs.
    pub fn sources(&self, target: PortId) -> &[PortId] {
        self.sources.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Empfänger eines Ausgangs.
    pub fn recipients(&self, source: PortId) -> &[PortId] {
        self.recipients.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Prüft ob die Kante `source → target` existiert
    pub fn has_connection(&self, source: PortId, target: PortId) -> bool {
        self.sources(target).contains(&source)
    }

    /// Verbindet `source → target`.
    ///
    /// Validiert Existenz, Grips, Self-Loops und Duplikate.
    pub fn add_source(&mut self, target: PortId, source: PortId) -> bool {
        if target == source {
            log::warn!("Self-Loop nicht erlaubt (Port {})", target);
            return false;
        }
        let (Some(t), Some(s)) = (self.ports.get(&target), self.ports.get(&source)) else {
            log::warn!(
                "Verbindung nicht möglich: Port {} oder {} existiert nicht",
                source,
                target
            );
            return false;
        };
        if !t.has_input_grip() || !s.has_output_grip() {
            log::warn!(
                "Verbindung {}→{} nicht möglich: fehlender Grip",
                source,
                target
            );
            return false;
        }
        if self.has_connection(source, target) {
            log::debug!("Verbindung {}→{} existiert bereits", source, target);
            return false;
        }

        self.sources.entry(target).or_default().push(source);
        self.recipients.entry(source).or_default().push(target);
        true
    }

    /// Entfernt die Kante `source → target`.
    pub fn remove_source(&mut self, target: PortId, source: PortId) -> bool {
        let Some(list) = self.sources.get_mut(&target) else {
            return false;
        };
        let before = list.len();
        list.retain(|&s| s != source);
        if list.len() == before {
            return false;
        }
        if let Some(recipients) = self.recipients.get_mut(&source) {
            recipients.retain(|&r| r != target);
        }
        true
    }

    /// Entfernt alle Quellen eines Eingangs. Gibt die Anzahl entfernter Kanten zurück.
    pub fn remove_all_sources(&mut self, target: PortId) -> usize {
        let Some(list) = self.sources.remove(&target) else {
            return 0;
        };
        for source in &list {
            if let Some(recipients) = self.recipients.get_mut(source) {
                recipients.retain(|&r| r != target);
            }
        }
        list.len()
    }

    /// Iterator über alle gespeicherten Verbindungen (read-only).
    pub fn connections_iter(&self) -> impl Iterator<Item = Connection> + '_ {
        self.sources
            .iter()
            .flat_map(|(&target, list)| list.iter().map(move |&source| Connection::new(source, target)))
    }

    pub fn connection_count(&self) -> usize {
        self.sources.values().map(Vec::len).sum()
    }

    /// Output-Anker der Quelle und Input-Anker des Ziels einer Verbindung.
    pub fn anchors(&self, connection: Connection) -> Option<(Vec2, Vec2)> {
        let source = self.ports.get(&connection.source)?;
        let target = self.ports.get(&connection.target)?;
        Some((source.output_grip, target.input_grip))
    }

    /// Übernimmt die Kanten aus `other`; Nodes, Ports und Anker bleiben.
    ///
    /// Kanten zu Ports, die hier nicht existieren, werden verworfen.
    pub fn restore_wiring_from(&mut self, other: &Graph) {
        self.sources.clear();
        self.recipients.clear();
        for connection in other.connections_iter() {
            if self.ports.contains_key(&connection.source)
                && self.ports.contains_key(&connection.target)
            {
                self.sources
                    .entry(connection.target)
                    .or_default()
                    .push(connection.source);
            }
        }
        for (&source, list) in &other.recipients {
            let kept: Vec<PortId> = list
                .iter()
                .copied()
                .filter(|target| self.sources(*target).contains(&source))
                .collect();
            if !kept.is_empty() {
                self.recipients.insert(source, kept);
            }
        }
    }
}

/// Port-IDs eines Nodes ohne Doppelte (ein bidirektionaler Port steht in
/// beiden Listen).
fn port_ids_of(node: &Node) -> IndexSet<PortId> {
    node.inputs()
        .iter()
        .chain(node.outputs())
        .copied()
        .collect()
}
