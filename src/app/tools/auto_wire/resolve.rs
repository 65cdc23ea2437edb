//! Auflösung und Übernahme eines Splice: gezogenes Objekt in einen Wire einfügen.

use super::cast::can_cast;
use crate::app::catalog::WireCatalog;
use crate::app::transaction::{EditError, EditTransaction};
use crate::core::{Connection, Graph, NodeId, PortId};

/// Ergebnis der Auflösung: welche Ports des gezogenen Objekts den Wire ersetzen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpliceResolution {
    /// Der bestehende Wire
    pub wire: Connection,
    /// Gezogenes Objekt, wird nach dem Einfügen neu berechnet
    pub node: NodeId,
    /// Eingang, der die Quelle des Wires übernimmt
    pub input: Option<PortId>,
    /// Ausgang, der das Ziel des Wires speist
    pub output: Option<PortId>,
}

impl SpliceResolution {
    pub fn is_empty(&self) -> bool {
        self.input.is_none() && self.output.is_none()
    }

    /// Verbindungen, die nach dem Einfügen entstehen (für die Vorschau).
    pub fn preview_connections(&self) -> Vec<Connection> {
        let mut connections = Vec::with_capacity(2);
        if let Some(input) = self.input {
            connections.push(Connection::new(self.wire.source, input));
        }
        if let Some(output) = self.output {
            connections.push(Connection::new(output, self.wire.target));
        }
        connections
    }
}

/// Bestimmt Ein- und Ausgang des gezogenen Objekts für den Wire.
///
/// Eigenständiger Parameter: derselbe Port wird unabhängig als Eingang
/// (`can_cast(quelle, port)`) und als Ausgang (`can_cast(port, ziel)`)
/// geprüft. Komponente: jeweils der erste passende Port in
/// Deklarationsreihenfolge. `None`, wenn der Wire nicht existiert oder
/// nichts passt.
pub fn resolve(graph: &Graph, dragged: NodeId, wire: Connection) -> Option<SpliceResolution> {
    if !graph.has_connection(wire.source, wire.target) {
        return None;
    }
    let node = graph.node(dragged)?;

    let (input, output) = match node.as_parameter() {
        Some(port) => (
            can_cast(graph, wire.source, port).then_some(port),
            can_cast(graph, port, wire.target).then_some(port),
        ),
        None => (
            node.inputs()
                .iter()
                .copied()
                .find(|&port| can_cast(graph, wire.source, port)),
            node.outputs()
                .iter()
                .copied()
                .find(|&port| can_cast(graph, port, wire.target)),
        ),
    };

    let resolution = SpliceResolution {
        wire,
        node: dragged,
        input,
        output,
    };
    (!resolution.is_empty()).then_some(resolution)
}

/// Gehört der Wire bereits zum gezogenen Objekt oder wäre das Einfügen redundant?
///
/// Wires, die an einem Port des Objekts selbst hängen, werden übersprungen.
/// Bei einem eigenständigen Parameter zusätzlich jeder Wire, dessen Quelle
/// schon Quelle des Parameters ist oder dessen Ziel schon vom Parameter
/// gespeist wird; die jeweils andere Seite wird dann nicht mehr geprüft.
fn is_skipped(graph: &Graph, dragged: NodeId, wire: Connection) -> bool {
    let owned_by_dragged = |port: PortId| {
        graph
            .port(port)
            .is_some_and(|p| p.node_id == dragged)
    };
    if owned_by_dragged(wire.source) || owned_by_dragged(wire.target) {
        return true;
    }
    let Some(param) = graph.node(dragged).and_then(|node| node.as_parameter()) else {
        return false;
    };
    graph.sources(param).contains(&wire.source) || graph.recipients(param).contains(&wire.target)
}

/// Erster sichtbarer Wire, dessen Umriss (Breite `width`) die Bounds des
/// gezogenen Nodes berührt.
pub fn find_splice_candidate(
    catalog: &WireCatalog<'_>,
    dragged: NodeId,
    width: f32,
) -> Option<Connection> {
    let graph = catalog.graph();
    let bounds = graph.node(dragged)?.bounds;
    catalog
        .visible_wires()
        .filter(|(wire, _)| !is_skipped(graph, dragged, *wire))
        .find(|(_, geometry)| catalog.touches_region(geometry, width, &bounds))
        .map(|(wire, _)| wire)
}

/// Stellt die Edits eines Splice in einer Transaktion zusammen.
///
/// Alter Wire wird entfernt. Eingang: alle Quellen löschen, dann die
/// Wire-Quelle anschließen. Ausgang: alle bisherigen Empfänger abhängen,
/// dann das Wire-Ziel speisen. Danach genau eine Neuberechnung ab dem
/// gezogenen Objekt.
pub fn stage_splice(tx: &mut EditTransaction, resolution: &SpliceResolution) -> Result<(), EditError> {
    let wire = resolution.wire;
    tx.remove_source(wire.target, wire.source)?;

    if let Some(input) = resolution.input {
        tx.remove_all_sources(input)?;
        tx.add_source(input, wire.source)?;
    }

    if let Some(output) = resolution.output {
        let recipients: Vec<PortId> = tx.graph().recipients(output).to_vec();
        for recipient in recipients.into_iter().rev() {
            tx.remove_source(recipient, output)?;
        }
        tx.add_source(wire.target, output)?;
    }

    tx.schedule_recompute(resolution.node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Port, PortDirection, Rect, Viewport};
    use glam::Vec2;
    use std::sync::Arc;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
        Rect::from_corners(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    /// A.out(1) → B.in(2), dazwischen frei: Komponente C (in 31, out 32)
    /// und Parameter P (40), alle "Number".
    fn scene() -> Graph {
        let mut graph = Graph::new();
        graph.add_component(
            10,
            "A",
            rect(-40.0, -10.0, 0.0, 10.0),
            vec![Port::new(1, 0, PortDirection::Output, "Number", Vec2::ZERO)],
        );
        graph.add_component(
            20,
            "B",
            rect(400.0, -10.0, 440.0, 10.0),
            vec![Port::new(2, 0, PortDirection::Input, "Number", Vec2::new(400.0, 0.0))],
        );
        graph.add_component(
            30,
            "C",
            rect(180.0, -10.0, 220.0, 10.0),
            vec![
                Port::new(31, 0, PortDirection::Input, "Text", Vec2::new(180.0, -5.0)),
                Port::new(33, 0, PortDirection::Input, "Number", Vec2::new(180.0, 5.0)),
                Port::new(32, 0, PortDirection::Output, "Number", Vec2::new(220.0, 0.0)),
            ],
        );
        graph.add_parameter(
            40,
            "P",
            rect(180.0, 100.0, 220.0, 120.0),
            Port::new(41, 0, PortDirection::Bidirectional, "Number", Vec2::ZERO)
                .with_grips(Vec2::new(180.0, 110.0), Vec2::new(220.0, 110.0)),
        );
        assert!(graph.add_source(2, 1));
        graph
    }

    #[test]
    fn component_uses_first_matching_ports() {
        let graph = scene();
        let resolution = resolve(&graph, 30, Connection::new(1, 2)).expect("auflösbar");
        // Eingang 31 ist "Text" und passt nicht, 33 ist der erste passende
        assert_eq!(resolution.input, Some(33));
        assert_eq!(resolution.output, Some(32));
        assert_eq!(
            resolution.preview_connections(),
            vec![Connection::new(1, 33), Connection::new(32, 2)]
        );
    }

    #[test]
    fn parameter_resolves_both_sides_independently() {
        let graph = scene();
        let resolution = resolve(&graph, 40, Connection::new(1, 2)).expect("auflösbar");
        assert_eq!(resolution.input, Some(41));
        assert_eq!(resolution.output, Some(41));
    }

    #[test]
    fn missing_wire_or_node_resolves_to_none() {
        let graph = scene();
        assert_eq!(resolve(&graph, 30, Connection::new(32, 2)), None);
        assert_eq!(resolve(&graph, 99, Connection::new(1, 2)), None);
    }

    #[test]
    fn candidate_is_found_under_dragged_node() {
        let graph = scene();
        let viewport = Viewport::default();
        let catalog = WireCatalog::new(&graph, &viewport);
        // Wire verläuft gerade bei y = 0 durch C (y -10..10)
        assert_eq!(find_splice_candidate(&catalog, 30, 2.0), Some(Connection::new(1, 2)));
        // P liegt bei y = 100..120, weit weg vom Wire
        assert_eq!(find_splice_candidate(&catalog, 40, 2.0), None);
    }

    #[test]
    fn wires_of_the_dragged_node_are_skipped() {
        let mut graph = scene();
        let viewport = Viewport::default();
        // A wird gezogen: sein eigener Wire berührt seine Bounds
        let catalog = WireCatalog::new(&graph, &viewport);
        assert_eq!(find_splice_candidate(&catalog, 10, 2.0), None);

        // P hängt schon an Quelle 1 → Wire 1→2 wird komplett übersprungen
        assert!(graph.add_source(41, 1));
        graph.translate_node(40, Vec2::new(0.0, -110.0));
        let catalog = WireCatalog::new(&graph, &viewport);
        assert_eq!(find_splice_candidate(&catalog, 40, 2.0), None);
    }

    #[test]
    fn staged_splice_rewires_atomically() {
        let mut graph = scene();
        // Eingang 33 hat schon eine Quelle, Ausgang 32 schon einen Empfänger
        graph.add_component(
            50,
            "D",
            rect(600.0, 0.0, 640.0, 20.0),
            vec![
                Port::new(51, 0, PortDirection::Output, "Number", Vec2::new(640.0, 10.0)),
                Port::new(52, 0, PortDirection::Input, "Number", Vec2::new(600.0, 10.0)),
            ],
        );
        assert!(graph.add_source(33, 51));
        assert!(graph.add_source(52, 32));
        let graph = Arc::new(graph);

        let resolution = resolve(&graph, 30, Connection::new(1, 2)).expect("auflösbar");
        let mut tx = EditTransaction::begin(&graph, "AutoWire");
        stage_splice(&mut tx, &resolution).expect("gültige Edits");

        let staged = tx.graph();
        assert!(!staged.has_connection(1, 2));
        assert_eq!(staged.sources(33), &[1]);
        assert_eq!(staged.sources(2), &[32]);
        assert!(staged.recipients(32).iter().all(|&r| r == 2));
        // Original unverändert
        assert!(graph.has_connection(1, 2));
        assert_eq!(graph.sources(33), &[51]);
    }
}
