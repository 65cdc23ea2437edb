//! Integrationstests für Kurven-Geometrie, Sichtbarkeit, Hit-Tests und Typ-Prüfung:
//! - Szenario A(0,0) → B(200,50)
//! - entartete und kleine Wires
//! - Abstand und Radius-Monotonie
//! - CanCast-Wildcards

use approx::assert_relative_eq;
use glam::Vec2;
use std::collections::HashSet;
use wire_tools::app::catalog::is_visible_between;
use wire_tools::app::hit_test::{distance_to_point, is_touching_point};
use wire_tools::app::tools::auto_wire::can_cast;
use wire_tools::app::VisibilityRules;
use wire_tools::core::PortCapabilities;
use wire_tools::{
    Connection, Graph, Port, PortDirection, Rect, Viewport, WireCatalog, WireGeometry,
};

fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
    Rect::from_corners(Vec2::new(x0, y0), Vec2::new(x1, y1))
}

/// Zwei Komponenten A (out 1 bei (0,0)) und B (in 2 bei (200,50)), verbunden.
fn scenario_graph() -> Graph {
    let mut graph = Graph::new();
    graph.add_component(
        1,
        "A",
        rect(-40.0, -10.0, 0.0, 10.0),
        vec![Port::new(1, 0, PortDirection::Output, "Number", Vec2::ZERO)],
    );
    graph.add_component(
        2,
        "B",
        rect(200.0, 40.0, 240.0, 60.0),
        vec![Port::new(2, 0, PortDirection::Input, "Number", Vec2::new(200.0, 50.0))],
    );
    assert!(graph.add_source(2, 1));
    graph
}

// ─── Szenario ────────────────────────────────────────────────────────────────

#[test]
fn test_szenario_a_nach_b_kontrollpunkte_und_sichtbarkeit() {
    let graph = scenario_graph();
    let (output, input) = graph
        .anchors(Connection::new(1, 2))
        .expect("Anker vorhanden");
    let geometry = WireGeometry::from_anchors(output, input);

    assert_relative_eq!(WireGeometry::span(output, input), 100.0);
    let [p0, c1, c2, p3] = geometry.control_points();
    assert_eq!(p0, Vec2::ZERO);
    assert_eq!(c1, Vec2::new(100.0, 0.0));
    assert_eq!(c2, Vec2::new(100.0, 50.0));
    assert_eq!(p3, Vec2::new(200.0, 50.0));

    let viewport = Viewport::default();
    let catalog = WireCatalog::new(&graph, &viewport);
    assert!(catalog.is_visible(Connection::new(1, 2)));
    assert_eq!(catalog.enumerate_visible(), vec![Connection::new(1, 2)]);
    assert!(can_cast(&graph, 1, 2));
}

#[test]
fn test_endpunkte_entsprechen_exakt_den_ankern() {
    let pairs = [
        (Vec2::ZERO, Vec2::new(200.0, 50.0)),
        (Vec2::new(300.0, 10.0), Vec2::new(-120.0, 400.0)),
        (Vec2::new(5.0, 5.0), Vec2::new(5.0, -250.0)),
    ];
    for (output, input) in pairs {
        let geometry = WireGeometry::from_anchors(output, input);
        assert_eq!(geometry.point_at(0.0), output);
        assert_eq!(geometry.point_at(1.0), input);
        let d = (input - output).abs();
        assert_relative_eq!(
            WireGeometry::span(output, input),
            (0.5 * d.x).max(0.75 * d.y)
        );
    }
}

// ─── Sichtbarkeit ────────────────────────────────────────────────────────────

#[test]
fn test_zusammenfallende_anker_sind_unsichtbar() {
    let viewport = Viewport::default();
    let rules = VisibilityRules::default();
    for (dx, dy) in [(0.0, 0.0), (1.9, 0.0), (0.0, -1.9), (1.5, 1.5), (-1.99, 1.99)] {
        let output = Vec2::new(300.0, 300.0);
        assert!(
            !is_visible_between(output, output + Vec2::new(dx, dy), &viewport, &rules),
            "Δ=({dx},{dy}) darf nicht sichtbar sein"
        );
    }
}

#[test]
fn test_kleine_wires_verschwinden_beim_herauszoomen() {
    let rules = VisibilityRules::default();
    let output = Vec2::new(100.0, 100.0);
    let input = Vec2::new(120.0, 100.0);

    let near = Viewport::new(1.0, rect(0.0, 0.0, 1280.0, 720.0));
    assert!(is_visible_between(output, input, &near, &rules));

    // 20 Einheiten * 0.3 = 6 px < 8 px
    let far = Viewport::new(0.3, rect(0.0, 0.0, 4000.0, 2400.0));
    assert!(!is_visible_between(output, input, &far, &rules));
}

#[test]
fn test_wires_ausserhalb_des_sichtbereichs_fehlen_in_der_aufzaehlung() {
    let mut graph = scenario_graph();
    graph.add_component(
        3,
        "Fern",
        rect(5000.0, 5000.0, 5040.0, 5020.0),
        vec![
            Port::new(31, 0, PortDirection::Output, "Number", Vec2::new(5040.0, 5010.0)),
            Port::new(32, 0, PortDirection::Input, "Number", Vec2::new(5000.0, 5010.0)),
        ],
    );
    graph.add_component(
        4,
        "Fern2",
        rect(5300.0, 5100.0, 5340.0, 5120.0),
        vec![Port::new(41, 0, PortDirection::Input, "Number", Vec2::new(5300.0, 5110.0))],
    );
    assert!(graph.add_source(41, 31));
    // Zwei Quellen an einem Einzelwert-Eingang: beide werden aufgezählt
    assert!(graph.add_source(2, 31));

    let viewport = Viewport::default();
    let visible: HashSet<Connection> = WireCatalog::new(&graph, &viewport)
        .enumerate_visible()
        .into_iter()
        .collect();
    assert!(visible.contains(&Connection::new(1, 2)));
    // 31 → 2: Ziel im Sichtbereich, Quelle weit draußen; Y-Band über Ziel, X-Band über Ziel
    assert!(visible.contains(&Connection::new(31, 2)));
    assert!(!visible.contains(&Connection::new(31, 41)));
}

// ─── Hit-Tests ───────────────────────────────────────────────────────────────

#[test]
fn test_abstand_zu_kurvenpunkten_ist_null() {
    let geometry = WireGeometry::from_anchors(Vec2::ZERO, Vec2::new(200.0, 50.0));
    for i in 0..=20 {
        let t = i as f32 / 20.0;
        let (point, _) = geometry.evaluate(t);
        assert!(
            distance_to_point(&geometry, point) < 0.05,
            "t={t}: Abstand {}",
            distance_to_point(&geometry, point)
        );
    }
}

#[test]
fn test_beruehrung_ist_monoton_im_radius() {
    let geometry = WireGeometry::from_anchors(Vec2::new(10.0, 20.0), Vec2::new(260.0, -90.0));
    let probes = [
        Vec2::new(130.0, -30.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(150.0, 120.0),
    ];
    for probe in probes {
        let distance = distance_to_point(&geometry, probe);
        let mut touched = false;
        for step in 0..60 {
            let radius = step as f32 * 5.0;
            let now = is_touching_point(&geometry, probe, radius);
            assert!(!touched || now, "Radius {radius} verliert Berührung");
            touched = now;
        }
        assert!(touched, "Abstand {distance} muss bei 295 erreicht sein");
    }
}

#[test]
fn test_find_wire_at_trifft_nur_nahe_punkte() {
    let graph = scenario_graph();
    let viewport = Viewport::default();
    let catalog = WireCatalog::new(&graph, &viewport);
    let geometry = catalog
        .geometry_of(Connection::new(1, 2))
        .expect("Kurve vorhanden");
    let on_curve = geometry.point_at(0.3);

    assert_eq!(catalog.find_wire_at(on_curve, 5.0), Some(Connection::new(1, 2)));
    assert_eq!(catalog.find_wire_at(on_curve + Vec2::new(0.0, 40.0), 5.0), None);
}

// ─── CanCast ─────────────────────────────────────────────────────────────────

fn typed_graph(generic: PortCapabilities) -> Graph {
    let mut graph = Graph::new();
    graph.add_component(
        1,
        "Quelle",
        rect(0.0, 0.0, 40.0, 20.0),
        vec![
            Port::new(11, 0, PortDirection::Output, "Text", Vec2::new(40.0, 10.0)),
            Port::new(12, 0, PortDirection::Input, "Text", Vec2::new(0.0, 10.0)),
        ],
    );
    graph.add_component(
        2,
        "Ziel",
        rect(200.0, 0.0, 240.0, 20.0),
        vec![
            Port::new(21, 0, PortDirection::Input, "Mesh", Vec2::new(200.0, 10.0))
                .with_capabilities(generic),
            Port::new(22, 0, PortDirection::Output, "Mesh", Vec2::new(240.0, 10.0))
                .with_capabilities(generic),
            Port::new(23, 0, PortDirection::Input, "Mesh", Vec2::new(200.0, 15.0)),
        ],
    );
    graph
}

#[test]
fn test_can_cast_mit_sich_selbst_ist_immer_falsch() {
    let graph = typed_graph(PortCapabilities {
        accepts_any: true,
        ..PortCapabilities::default()
    });
    for port in [11, 12, 21, 22, 23] {
        assert!(!can_cast(&graph, port, port), "Port {port}");
    }
}

#[test]
fn test_generische_ports_sind_wildcards_in_beide_richtungen() {
    let flags = [
        PortCapabilities {
            accepts_any: true,
            ..PortCapabilities::default()
        },
        PortCapabilities {
            is_geometry: true,
            ..PortCapabilities::default()
        },
        PortCapabilities {
            is_passthrough: true,
            ..PortCapabilities::default()
        },
    ];
    for generic in flags {
        let graph = typed_graph(generic);
        // Text → generischer Mesh-Eingang
        assert!(can_cast(&graph, 11, 21));
        // generischer Mesh-Ausgang → Text
        assert!(can_cast(&graph, 22, 12));
        // ohne Wildcard passt Text nicht auf Mesh
        assert!(!can_cast(&graph, 11, 23));
    }
}
