//! Wire-Tools Demo.
//!
//! Spielt eine Knife-Geste und einen AutoWire-Splice auf einem kleinen
//! Beispiel-Graphen ab und protokolliert die Edit-Gruppen.

use glam::Vec2;
use std::time::Duration;
use wire_tools::app::{OverlayItem, OverlayPainter, OverlayScene};
use wire_tools::{
    EditLog, Graph, InputEvent, Key, Port, PortDirection, Rect, WireEditor, WireToolsOptions,
};

fn main() -> anyhow::Result<()> {
    DemoRunner::run()
}

struct DemoRunner;

impl DemoRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Wire-Tools Demo v{} startet...", env!("CARGO_PKG_VERSION"));

        let config_path = WireToolsOptions::config_path();
        let options = WireToolsOptions::load_from_file(&config_path);

        let mut editor = WireEditor::new(sample_graph(), options);
        let mut log = EditLog::new();
        let mut painter = LoggingPainter;

        log::info!(
            "{} Nodes, {} Verbindungen, {} sichtbar",
            editor.graph().node_count(),
            editor.graph().connection_count(),
            editor.catalog().enumerate_visible().len()
        );

        Self::knife_swipe(&mut editor, &mut log, &mut painter)?;
        Self::auto_wire_drag(&mut editor, &mut log, &mut painter)?;

        for group in log.groups() {
            log::info!("Gruppe '{}' mit {} Änderungen", group.label, group.edits.len());
        }
        for connection in editor.graph().connections_iter() {
            log::info!("Verbindung {}→{}", connection.source, connection.target);
        }

        if editor.undo() {
            log::info!(
                "Nach Rückgängig: {} Verbindungen",
                editor.graph().connection_count()
            );
        }
        Ok(())
    }

    /// Schneidet den Wire A→C mit einer senkrechten Knife-Spur.
    fn knife_swipe(
        editor: &mut WireEditor,
        log: &mut EditLog,
        painter: &mut LoggingPainter,
    ) -> anyhow::Result<()> {
        let key = Key::Char(editor.options().knife_key);
        editor.dispatch(&InputEvent::KeyDown(key), log)?;
        editor.dispatch(&InputEvent::PointerDown(Vec2::new(200.0, 60.0)), log)?;

        let mut y = 60.0;
        while y <= 140.0 {
            let event = InputEvent::PointerMove {
                position: Vec2::new(200.0, y),
                pressed: true,
            };
            editor.dispatch(&event, log)?;
            editor.dispatch(&InputEvent::Tick(Duration::from_millis(4)), log)?;
            y += 4.0;
        }
        editor.paint_overlay(painter, 0.0);

        editor.dispatch(&InputEvent::PointerUp(Vec2::new(200.0, 140.0)), log)?;
        editor.dispatch(&InputEvent::KeyUp(key), log)?;
        Ok(())
    }

    /// Zieht M mit gehaltener Control-Taste auf den Wire A→B.
    fn auto_wire_drag(
        editor: &mut WireEditor,
        log: &mut EditLog,
        painter: &mut LoggingPainter,
    ) -> anyhow::Result<()> {
        editor.dispatch(&InputEvent::KeyDown(Key::Control), log)?;
        for _ in 0..4 {
            let event = InputEvent::DragMoved {
                nodes: vec![40],
                delta: Vec2::new(0.0, -100.0),
            };
            editor.dispatch(&event, log)?;
            editor.paint_overlay(painter, 0.5);
        }
        editor.dispatch(&InputEvent::DragEnded, log)?;
        editor.dispatch(&InputEvent::KeyUp(Key::Control), log)?;
        Ok(())
    }
}

/// A → B (gerade) und A → C (S-Kurve); M liegt frei darunter.
fn sample_graph() -> Graph {
    let mut graph = Graph::new();
    graph.add_component(
        10,
        "A",
        Rect::from_corners(Vec2::new(-60.0, -20.0), Vec2::new(0.0, 20.0)),
        vec![Port::new(1, 0, PortDirection::Output, "Number", Vec2::ZERO).with_name("Wert")],
    );
    graph.add_component(
        20,
        "B",
        Rect::from_corners(Vec2::new(400.0, -20.0), Vec2::new(460.0, 20.0)),
        vec![Port::new(2, 0, PortDirection::Input, "Number", Vec2::new(400.0, 0.0)).with_name("x")],
    );
    graph.add_component(
        30,
        "C",
        Rect::from_corners(Vec2::new(400.0, 180.0), Vec2::new(460.0, 220.0)),
        vec![Port::new(3, 0, PortDirection::Input, "Number", Vec2::new(400.0, 200.0)).with_name("y")],
    );
    graph.add_component(
        40,
        "M",
        Rect::from_corners(Vec2::new(180.0, 390.0), Vec2::new(220.0, 410.0)),
        vec![
            Port::new(41, 0, PortDirection::Input, "Number", Vec2::new(180.0, 400.0)).with_name("a"),
            Port::new(42, 0, PortDirection::Output, "Number", Vec2::new(220.0, 400.0))
                .with_name("r"),
        ],
    );
    graph.add_source(2, 1);
    graph.add_source(3, 1);
    graph
}

/// Painter, der nur den Inhalt der Szene protokolliert.
struct LoggingPainter;

impl OverlayPainter for LoggingPainter {
    fn paint(&mut self, scene: &OverlayScene) -> anyhow::Result<()> {
        let wires = scene
            .items()
            .iter()
            .filter(|item| matches!(item, OverlayItem::Wire { .. }))
            .count();
        log::debug!("Overlay: {} Elemente, davon {} Wires", scene.len(), wires);
        Ok(())
    }
}
