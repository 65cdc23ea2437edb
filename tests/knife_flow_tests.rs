//! Integrationstests für die Knife-Geste über die `WireEditor`-Fassade:
//! - Schnitt durch A(0,0) → B(200,50) mit genau einer Gruppe und Neuberechnung
//! - Sample-Abstand und Decay
//! - abgelehnter Commit

use glam::Vec2;
use std::time::Duration;
use wire_tools::app::tools::knife::{StrokeDecay, StrokeTrail};
use wire_tools::app::transaction::WireEdit;
use wire_tools::{
    EditError, EditNotifier, Graph, HandlerResponse, InputEvent, Key, NodeId, Port,
    PortDirection, Rect, WireEditor, WireToolsOptions,
};

/// Zeichnet jeden Aufruf des Editors am Host nach.
#[derive(Default)]
struct RecordingHost {
    calls: Vec<String>,
    recomputes: Vec<NodeId>,
    reject: bool,
}

impl EditNotifier for RecordingHost {
    fn begin_group(&mut self, label: &str) {
        self.calls.push(format!("begin {label}"));
    }

    fn record(&mut self, edit: &WireEdit) {
        self.calls.push(format!("{edit:?}"));
    }

    fn commit_group(&mut self) -> anyhow::Result<()> {
        if self.reject {
            anyhow::bail!("Host lehnt ab");
        }
        self.calls.push("commit".to_string());
        Ok(())
    }

    fn abort_group(&mut self) {
        self.calls.push("abort".to_string());
    }

    fn request_recompute(&mut self, node: NodeId) {
        self.recomputes.push(node);
    }
}

/// Komponenten A (out 1 bei (0,0)) und B (in 2 bei (200,50)).
fn graph_a_b() -> Graph {
    let mut graph = Graph::new();
    graph.add_component(
        100,
        "A",
        Rect::from_corners(Vec2::new(-40.0, -10.0), Vec2::new(0.0, 10.0)),
        vec![Port::new(1, 0, PortDirection::Output, "Number", Vec2::ZERO)],
    );
    graph.add_component(
        200,
        "B",
        Rect::from_corners(Vec2::new(200.0, 40.0), Vec2::new(240.0, 60.0)),
        vec![Port::new(2, 0, PortDirection::Input, "Number", Vec2::new(200.0, 50.0))],
    );
    assert!(graph.add_source(2, 1));
    graph
}

fn swipe(
    editor: &mut WireEditor,
    host: &mut RecordingHost,
    from: Vec2,
    to: Vec2,
    steps: usize,
) -> Vec<Result<HandlerResponse, EditError>> {
    let mut results = Vec::new();
    results.push(editor.dispatch(&InputEvent::PointerDown(from), host));
    for i in 0..=steps {
        let position = from.lerp(to, i as f32 / steps as f32);
        results.push(editor.dispatch(
            &InputEvent::PointerMove {
                position,
                pressed: true,
            },
            host,
        ));
    }
    results.push(editor.dispatch(&InputEvent::PointerUp(to), host));
    results
}

#[test]
fn test_knife_schnitt_trennt_wire_in_einer_gruppe() {
    let mut editor = WireEditor::new(graph_a_b(), WireToolsOptions::default());
    let mut host = RecordingHost::default();

    assert_eq!(
        editor.dispatch(&InputEvent::KeyDown(Key::Char('k')), &mut host),
        Ok(HandlerResponse::Capture)
    );
    let results = swipe(
        &mut editor,
        &mut host,
        Vec2::new(100.0, -20.0),
        Vec2::new(100.0, 70.0),
        30,
    );
    assert!(results.iter().all(Result::is_ok));

    assert!(!editor.graph().has_connection(1, 2));
    assert_eq!(
        host.calls,
        vec![
            "begin Wire trennen".to_string(),
            format!("{:?}", WireEdit::RemoveSource { target: 2, source: 1 }),
            "commit".to_string(),
        ]
    );
    assert_eq!(host.recomputes, vec![200]);
}

#[test]
fn test_knife_ohne_taste_wirkt_nicht() {
    let mut editor = WireEditor::new(graph_a_b(), WireToolsOptions::default());
    let mut host = RecordingHost::default();

    let results = swipe(
        &mut editor,
        &mut host,
        Vec2::new(100.0, -20.0),
        Vec2::new(100.0, 70.0),
        30,
    );
    assert!(results
        .iter()
        .all(|r| *r == Ok(HandlerResponse::PassThrough)));
    assert!(editor.graph().has_connection(1, 2));
    assert!(host.calls.is_empty());
}

#[test]
fn test_abgelehnter_schnitt_laesst_graph_unveraendert() {
    let mut editor = WireEditor::new(graph_a_b(), WireToolsOptions::default());
    let mut host = RecordingHost {
        reject: true,
        ..RecordingHost::default()
    };
    let before = editor.shared_graph();

    editor
        .dispatch(&InputEvent::KeyDown(Key::Char('k')), &mut host)
        .expect("Taste");
    let results = swipe(
        &mut editor,
        &mut host,
        Vec2::new(100.0, -20.0),
        Vec2::new(100.0, 70.0),
        30,
    );

    let failures: Vec<&EditError> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(failures.len(), 1, "Geste wird nach dem ersten Fehler verworfen");
    assert!(matches!(failures[0], EditError::CommitRejected(_)));
    assert!(std::sync::Arc::ptr_eq(&before, &editor.shared_graph()));
    assert_eq!(host.calls.last().map(String::as_str), Some("abort"));
    assert!(host.recomputes.is_empty());
    assert!(!editor.can_undo());
}

#[test]
fn test_spur_haelt_mindestabstand() {
    let mut trail = StrokeTrail::default();
    let mut p = Vec2::ZERO;
    for i in 0..500 {
        // Mischung aus winzigen und größeren Schritten
        let step = if i % 7 == 0 { 3.1 } else { 0.4 };
        p += Vec2::new(step, (i as f32 * 0.3).cos() * 0.5);
        trail.push(p);
    }
    assert!(trail.len() > 2);
    for pair in trail.points().windows(2) {
        assert!(pair[0].distance(pair[1]) >= 2.0);
    }
}

#[test]
fn test_spur_schrumpft_nach_ablauf_der_geduld() {
    let mut trail = StrokeTrail::default();
    for i in 0..73 {
        trail.push(Vec2::new(i as f32 * 4.0, 0.0));
    }
    let mut decay = StrokeDecay::default();
    let mut previous = trail.len();
    let mut trimmed = false;
    for _ in 0..20 {
        decay.tick(&mut trail);
        if decay.is_exhausted() {
            assert!(trail.len() <= previous);
            trimmed |= trail.len() < previous;
        } else {
            assert_eq!(trail.len(), 73);
        }
        previous = trail.len();
    }
    assert!(trimmed);
    assert!(trail.is_empty());
}

#[test]
fn test_ticks_lassen_die_spur_im_editor_abklingen() {
    let mut editor = WireEditor::new(graph_a_b(), WireToolsOptions::default());
    let mut host = RecordingHost::default();
    editor
        .dispatch(&InputEvent::KeyDown(Key::Char('k')), &mut host)
        .expect("Taste");
    editor
        .dispatch(&InputEvent::PointerDown(Vec2::new(600.0, 300.0)), &mut host)
        .expect("Start");
    for i in 0..20 {
        let event = InputEvent::PointerMove {
            position: Vec2::new(600.0 + i as f32 * 5.0, 300.0),
            pressed: true,
        };
        editor.dispatch(&event, &mut host).expect("Sample");
    }
    assert!(!editor.build_overlay(0.0).is_empty());

    // 200 ms = 20 Ticks, weit mehr als Geduld + Kürzungen
    editor
        .dispatch(&InputEvent::Tick(Duration::from_millis(200)), &mut host)
        .expect("Tick");
    let scene = editor.build_overlay(0.0);
    // nur noch der Cursor
    assert_eq!(scene.len(), 1);
    assert!(editor.graph().has_connection(1, 2));
}
