//! Katalog der sichtbaren Wires: Aufzählung, Sichtbarkeit und Suche.
//!
//! Wires werden nie zwischengespeichert. Jede Abfrage liest die aktuellen
//! Anker aus dem Graphen und baut die Kurve neu auf.

use super::hit_test::{is_touching_point, is_touching_region_sampled};
use crate::core::{Connection, Graph, Rect, Viewport, WireType};
use crate::shared::options::{
    DEGENERATE_WIRE_EXTENT, MIN_SCREEN_EXTENT_PX, OUTLINE_SAMPLES, VIEWPORT_MARGIN,
    WIRE_PICK_RADIUS,
};
use crate::shared::{WireGeometry, WireToolsOptions};
use glam::Vec2;

/// Schwellwerte der Sichtbarkeits-Prüfung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityRules {
    /// Unter dieser Ausdehnung (beide Achsen) gilt ein Wire als entartet
    pub degenerate_extent: f32,
    /// Minimale Bildschirm-Ausdehnung in Pixeln
    pub min_screen_extent: f32,
    /// Vergrößerung des sichtbaren Bereichs (horizontal, vertikal)
    pub margin: Vec2,
}

impl Default for VisibilityRules {
    fn default() -> Self {
        Self {
            degenerate_extent: DEGENERATE_WIRE_EXTENT,
            min_screen_extent: MIN_SCREEN_EXTENT_PX,
            margin: Vec2::from(VIEWPORT_MARGIN),
        }
    }
}

impl From<&WireToolsOptions> for VisibilityRules {
    fn from(options: &WireToolsOptions) -> Self {
        Self {
            degenerate_extent: options.degenerate_wire_extent,
            min_screen_extent: options.min_screen_extent_px,
            margin: Vec2::from(options.viewport_margin),
        }
    }
}

/// Sichtbarkeit eines Wires zwischen zwei Ankern.
///
/// 1. Entartet, wenn beide Achsen-Abstände unter `degenerate_extent` liegen.
/// 2. Zu klein, wenn die größere Ausdehnung auf dem Bildschirm unter
///    `min_screen_extent` Pixeln liegt.
/// 3. Mindestens ein Endpunkt muss im vertikalen und mindestens einer im
///    horizontalen Band des vergrößerten Sichtbereichs liegen.
pub fn is_visible_between(
    output: Vec2,
    input: Vec2,
    viewport: &Viewport,
    rules: &VisibilityRules,
) -> bool {
    let delta = (input - output).abs();
    if delta.x < rules.degenerate_extent && delta.y < rules.degenerate_extent {
        return false;
    }
    if viewport.to_screen_length(delta.max_element()) < rules.min_screen_extent {
        return false;
    }

    let area = viewport.visible.inflate(rules.margin);
    let in_band_y = |p: Vec2| p.y >= area.min.y && p.y <= area.max.y;
    let in_band_x = |p: Vec2| p.x >= area.min.x && p.x <= area.max.x;
    (in_band_y(output) || in_band_y(input)) && (in_band_x(output) || in_band_x(input))
}

/// Kurve einer gespeicherten Verbindung (`None`, wenn ein Port fehlt).
pub fn geometry_of(graph: &Graph, connection: Connection) -> Option<WireGeometry> {
    let (output, input) = graph.anchors(connection)?;
    Some(WireGeometry::from_anchors(output, input))
}

/// Darstellungsklasse aus den Live-Daten der Quelle.
pub fn wire_type(graph: &Graph, connection: Connection) -> WireType {
    graph
        .port(connection.source)
        .map(|port| WireType::from_data(&port.data))
        .unwrap_or(WireType::Null)
}

/// Sichtbarkeit mit Standard-Schwellwerten.
pub fn is_visible(graph: &Graph, connection: Connection, viewport: &Viewport) -> bool {
    WireCatalog::new(graph, viewport).is_visible(connection)
}

/// Alle sichtbaren Verbindungen mit Standard-Schwellwerten.
pub fn enumerate_visible(graph: &Graph, viewport: &Viewport) -> Vec<Connection> {
    WireCatalog::new(graph, viewport).enumerate_visible()
}

/// Lesende Sicht auf die Wires eines Graphen innerhalb eines Viewports.
#[derive(Debug, Clone, Copy)]
pub struct WireCatalog<'a> {
    graph: &'a Graph,
    viewport: &'a Viewport,
    rules: VisibilityRules,
    pick_radius: f32,
    outline_samples: usize,
}

impl<'a> WireCatalog<'a> {
    pub fn new(graph: &'a Graph, viewport: &'a Viewport) -> Self {
        Self {
            graph,
            viewport,
            rules: VisibilityRules::default(),
            pick_radius: WIRE_PICK_RADIUS,
            outline_samples: OUTLINE_SAMPLES,
        }
    }

    /// Übernimmt Schwellwerte, Pick-Radius und Umriss-Auflösung aus den Optionen.
    pub fn with_options(mut self, options: &WireToolsOptions) -> Self {
        self.rules = VisibilityRules::from(options);
        self.pick_radius = options.wire_pick_radius;
        self.outline_samples = options.outline_samples;
        self
    }

    pub fn with_rules(mut self, rules: VisibilityRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn viewport(&self) -> &'a Viewport {
        self.viewport
    }

    pub fn geometry_of(&self, connection: Connection) -> Option<WireGeometry> {
        geometry_of(self.graph, connection)
    }

    pub fn is_visible(&self, connection: Connection) -> bool {
        self.graph
            .anchors(connection)
            .is_some_and(|(output, input)| {
                is_visible_between(output, input, self.viewport, &self.rules)
            })
    }

    /// Sichtbare Wires samt Kurve.
    ///
    /// Für jeden Eingang jedes Nodes wird jede aufgezeichnete Quelle besucht,
    /// auch wenn ein Einzelwert-Eingang semantisch ungültig mehrere hat.
    pub fn visible_wires(&self) -> impl Iterator<Item = (Connection, WireGeometry)> + 'a {
        let graph = self.graph;
        let viewport = self.viewport;
        let rules = self.rules;
        graph
            .nodes_iter()
            .flat_map(|node| node.inputs().iter().copied())
            .flat_map(move |target| {
                graph
                    .sources(target)
                    .iter()
                    .map(move |&source| Connection::new(source, target))
            })
            .filter_map(move |connection| {
                let (output, input) = graph.anchors(connection)?;
                is_visible_between(output, input, viewport, &rules)
                    .then(|| (connection, WireGeometry::from_anchors(output, input)))
            })
    }

    pub fn enumerate_visible(&self) -> Vec<Connection> {
        self.visible_wires().map(|(connection, _)| connection).collect()
    }

    /// Erster sichtbarer Wire, der näher als `radius` an `point` liegt.
    pub fn find_wire_at(&self, point: Vec2, radius: f32) -> Option<Connection> {
        self.visible_wires()
            .find(|(_, geometry)| is_touching_point(geometry, point, radius))
            .map(|(connection, _)| connection)
    }

    /// Wie [`Self::find_wire_at`] mit dem konfigurierten Pick-Radius.
    pub fn pick(&self, point: Vec2) -> Option<Connection> {
        self.find_wire_at(point, self.pick_radius)
    }

    /// Erster sichtbarer Wire, dessen Umriss der Breite `width` das Rechteck berührt.
    pub fn find_wire_in_rect(&self, rect: &Rect, width: f32) -> Option<Connection> {
        self.visible_wires()
            .find(|(_, geometry)| self.touches_region(geometry, width, rect))
            .map(|(connection, _)| connection)
    }

    /// Umriss-Test mit der konfigurierten Auflösung.
    pub fn touches_region(&self, geometry: &WireGeometry, width: f32, rect: &Rect) -> bool {
        is_touching_region_sampled(geometry, width, rect, self.outline_samples)
    }

    pub fn wire_type(&self, connection: Connection) -> WireType {
        wire_type(self.graph, connection)
    }
}
