//! Fassade für den Host: Graph, Viewport, Optionen, History und Handler-Kette.

use super::catalog::WireCatalog;
use super::history::{EditHistory, Snapshot};
use super::overlay::{paint_guarded, OverlayPainter, OverlayScene};
use super::tools::{
    AutoWireTool, GestureHandler, HandlerChain, HandlerResponse, InputEvent, KnifeTool,
    ToolContext,
};
use super::transaction::{EditError, EditNotifier};
use crate::core::{Connection, Graph, Viewport};
use crate::shared::WireToolsOptions;
use glam::Vec2;
use std::sync::Arc;

/// Maximale Undo-Tiefe.
const HISTORY_DEPTH: usize = 200;

/// Bündelt den Zustand, den die Wire-Tools zwischen Ereignissen brauchen.
pub struct WireEditor {
    graph: Arc<Graph>,
    viewport: Viewport,
    options: WireToolsOptions,
    history: EditHistory,
    chain: HandlerChain,
}

impl WireEditor {
    /// Editor mit Knife und AutoWire.
    pub fn new(graph: Graph, options: WireToolsOptions) -> Self {
        let mut editor = Self::without_tools(graph, options);
        editor.register(Box::new(KnifeTool::new(&editor.options)));
        editor.register(Box::new(AutoWireTool::new(&editor.options)));
        editor
    }

    /// Editor ohne registrierte Handler.
    pub fn without_tools(graph: Graph, options: WireToolsOptions) -> Self {
        Self {
            graph: Arc::new(graph),
            viewport: Viewport::default(),
            options,
            history: EditHistory::new_with_capacity(HISTORY_DEPTH),
            chain: HandlerChain::new(),
        }
    }

    pub fn register(&mut self, handler: Box<dyn GestureHandler>) {
        log::debug!("Handler '{}' registriert", handler.name());
        self.chain.register(handler);
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Geteilter Graph-Stand (O(1)-Klon).
    pub fn shared_graph(&self) -> Arc<Graph> {
        Arc::clone(&self.graph)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.viewport.pan(delta);
    }

    pub fn options(&self) -> &WireToolsOptions {
        &self.options
    }

    /// Übernimmt neue Optionen und reicht sie an alle Handler weiter.
    pub fn set_options(&mut self, options: WireToolsOptions) {
        self.chain.configure(&options);
        self.options = options;
    }

    pub fn chain(&self) -> &HandlerChain {
        &self.chain
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Sichtbare Wires im aktuellen Viewport.
    pub fn catalog(&self) -> WireCatalog<'_> {
        WireCatalog::new(&self.graph, &self.viewport).with_options(&self.options)
    }

    /// Sichtbarer Wire unter `point` innerhalb des konfigurierten Pick-Radius.
    pub fn pick_wire(&self, point: Vec2) -> Option<Connection> {
        self.catalog().pick(point)
    }

    // ── Eingabe ─────────────────────────────────────────────────────

    /// Verteilt ein Ereignis an die Handler-Kette.
    ///
    /// `DragMoved` verschiebt die gezogenen Nodes vorher im Graphen, damit
    /// die Tools bereits die neue Position sehen. Der erste von einem Handler
    /// gemeldete Fehler wird zurückgegeben; die Geste ist dann schon verworfen.
    pub fn dispatch(
        &mut self,
        event: &InputEvent,
        notifier: &mut dyn EditNotifier,
    ) -> Result<HandlerResponse, EditError> {
        if let InputEvent::DragMoved { nodes, delta } = event {
            if *delta != Vec2::ZERO {
                let graph = Arc::make_mut(&mut self.graph);
                for &node in nodes {
                    if !graph.translate_node(node, *delta) {
                        log::warn!("Drag: Node {} nicht gefunden", node);
                    }
                }
            }
        }

        let mut ctx = ToolContext::new(
            &mut self.graph,
            &self.viewport,
            &self.options,
            notifier,
            &mut self.history,
        );
        let response = self.chain.dispatch(event, &mut ctx);
        match ctx.take_failures().into_iter().next() {
            Some(error) => Err(error),
            None => Ok(response),
        }
    }

    /// Bricht alle laufenden Gesten ab.
    pub fn cancel_gestures(&mut self) {
        self.chain.cancel_all();
    }

    // ── Undo / Redo ─────────────────────────────────────────────────

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Stellt die Verdrahtung vor der letzten Edit-Gruppe wieder her.
    ///
    /// Node-Positionen und Port-Anker bleiben auf dem aktuellen Stand.
    pub fn undo(&mut self) -> bool {
        let Some(label) = self.history.undo_label().map(str::to_owned) else {
            return false;
        };
        self.chain.cancel_all();
        let current = Snapshot::new(&self.graph, label);
        match self.history.pop_undo_with_current(current) {
            Some(previous) => {
                log::info!("Rückgängig: {}", previous.label);
                Arc::make_mut(&mut self.graph).restore_wiring_from(&previous.graph);
                true
            }
            None => false,
        }
    }

    /// Wiederholt die zuletzt rückgängig gemachte Edit-Gruppe.
    pub fn redo(&mut self) -> bool {
        let Some(label) = self.history.redo_label().map(str::to_owned) else {
            return false;
        };
        self.chain.cancel_all();
        let current = Snapshot::new(&self.graph, label);
        match self.history.pop_redo_with_current(current) {
            Some(next) => {
                log::info!("Wiederholt: {}", next.label);
                Arc::make_mut(&mut self.graph).restore_wiring_from(&next.graph);
                true
            }
            None => false,
        }
    }

    // ── Overlay ─────────────────────────────────────────────────────

    /// Sammelt die Overlay-Elemente aller Handler.
    pub fn build_overlay(&self, focus: f32) -> OverlayScene {
        let mut scene =
            OverlayScene::new(focus).with_outline_samples(self.options.outline_samples);
        self.chain.paint_overlay(&mut scene, &self.graph);
        scene
    }

    /// Baut die Szene und zeichnet sie; Fehler des Painters werden nur geloggt.
    pub fn paint_overlay(&self, painter: &mut dyn OverlayPainter, focus: f32) -> bool {
        let scene = self.build_overlay(focus);
        paint_guarded(painter, &scene)
    }
}
