//! AutoWire: gezogenes Objekt bei gehaltener Control-Taste in einen Wire einfügen.
//!
//! **Ablauf:** Control halten → Armed; jede Drag-Bewegung eines einzelnen
//! Objekts sucht den ersten sichtbaren Wire unter dessen Bounds und löst die
//! passenden Ports auf (Vorschau). Drag-Ende übernimmt den Splice atomar.

mod cast;
mod resolve;

pub use cast::can_cast;
pub use resolve::{find_splice_candidate, resolve, stage_splice, SpliceResolution};

use super::{
    GestureEvent, GestureHandler, GesturePhase, HandlerResponse, InputEvent, Key, ToolContext,
};
use crate::app::overlay::{OverlayScene, OverlayWireRole};
use crate::app::transaction::{CommitOutcome, EditError, EditNotifier, EditTransaction};
use crate::core::{Graph, NodeId};
use crate::shared::{WireGeometry, WireToolsOptions};
use std::sync::Arc;

/// Übernimmt einen aufgelösten Splice als eine Edit-Gruppe.
///
/// `NotPerformed`, wenn keine oder eine leere Auflösung übergeben wird.
pub fn commit_splice(
    graph: &mut Arc<Graph>,
    resolution: Option<&SpliceResolution>,
    notifier: &mut dyn EditNotifier,
) -> Result<CommitOutcome, EditError> {
    match staged_transaction(graph, resolution)? {
        Some(tx) => tx.commit(graph, notifier),
        None => Ok(CommitOutcome::NotPerformed),
    }
}

fn staged_transaction(
    graph: &Arc<Graph>,
    resolution: Option<&SpliceResolution>,
) -> Result<Option<EditTransaction>, EditError> {
    let Some(resolution) = resolution.filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    let mut tx = EditTransaction::begin(graph, "AutoWire");
    stage_splice(&mut tx, resolution)?;
    Ok(Some(tx))
}

/// Gesten-Handler für das Einfügen beim Drag.
#[derive(Debug, Clone)]
pub struct AutoWireTool {
    phase: GesturePhase,
    ctrl_held: bool,
    dragged: Option<NodeId>,
    staged: Option<SpliceResolution>,
    enabled: bool,
    splice_width: f32,
    preview_width: f32,
}

impl Default for AutoWireTool {
    fn default() -> Self {
        Self::new(&WireToolsOptions::default())
    }
}

impl AutoWireTool {
    /// Priorität in der Handler-Kette (nach dem Knife).
    pub const PRIORITY: i32 = 10;

    pub fn new(options: &WireToolsOptions) -> Self {
        Self {
            phase: GesturePhase::Idle,
            ctrl_held: false,
            dragged: None,
            staged: None,
            enabled: options.auto_wire_enabled,
            splice_width: options.splice_outline_width,
            preview_width: options.wire_width_item,
        }
    }

    /// Aktuell vorgemerkter Splice (Vorschau).
    pub fn staged(&self) -> Option<&SpliceResolution> {
        self.staged.as_ref()
    }

    pub fn dragged(&self) -> Option<NodeId> {
        self.dragged
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sucht Kandidat und Auflösung für die aktuelle Position neu.
    fn refresh(&mut self, node: NodeId, ctx: &ToolContext<'_>) {
        let catalog = ctx.catalog();
        let staged = find_splice_candidate(&catalog, node, self.splice_width)
            .and_then(|wire| resolve(catalog.graph(), node, wire));
        if staged != self.staged {
            match &staged {
                Some(r) => log::debug!(
                    "AutoWire-Kandidat {}→{} (Eingang {:?}, Ausgang {:?})",
                    r.wire.source,
                    r.wire.target,
                    r.input,
                    r.output
                ),
                None => log::debug!("AutoWire: kein Kandidat"),
            }
        }
        self.dragged = Some(node);
        self.staged = staged;
    }

    /// Verwirft die Vorschau; bleibt bereit, solange Control gehalten wird.
    fn abandon(&mut self) {
        self.staged = None;
        self.dragged = None;
        if self.phase.is_engaged() {
            self.phase = self.phase.next(GestureEvent::Abort).next(GestureEvent::Settle);
            log::debug!("AutoWire-Geste abgebrochen");
        }
        if self.ctrl_held {
            self.phase = self.phase.next(GestureEvent::Arm);
        }
    }

    fn on_drag_moved(&mut self, nodes: &[NodeId], ctx: &mut ToolContext<'_>) -> HandlerResponse {
        if !self.enabled || !self.ctrl_held || !self.phase.is_live() {
            return HandlerResponse::PassThrough;
        }
        let [node] = nodes else {
            // Mehrfach-Drag fügt nichts ein
            self.abandon();
            return HandlerResponse::PassThrough;
        };
        if self.dragged.is_some_and(|d| d != *node) {
            self.staged = None;
        }
        if self.phase == GesturePhase::Armed {
            self.phase = self.phase.next(GestureEvent::Begin);
        }
        self.refresh(*node, ctx);
        HandlerResponse::Handled
    }

    fn on_drag_ended(&mut self, ctx: &mut ToolContext<'_>) -> HandlerResponse {
        if !self.phase.is_engaged() {
            return HandlerResponse::PassThrough;
        }
        let staged = self.staged.take();
        self.dragged = None;

        let result = staged_transaction(ctx.graph, staged.as_ref()).and_then(|tx| match tx {
            Some(tx) => ctx.commit(tx),
            None => Ok(CommitOutcome::NotPerformed),
        });
        match (result, staged) {
            (Ok(CommitOutcome::Performed), Some(r)) => {
                log::info!(
                    "AutoWire: Node {} in {}→{} eingefügt",
                    r.node,
                    r.wire.source,
                    r.wire.target
                );
                self.phase = self
                    .phase
                    .next(GestureEvent::Commit)
                    .next(GestureEvent::End);
            }
            (Ok(_), _) => {
                self.phase = self.phase.next(GestureEvent::End);
            }
            (Err(e), _) => {
                log::warn!("AutoWire fehlgeschlagen: {}", e);
                ctx.report(e);
                self.abandon();
            }
        }
        HandlerResponse::Handled
    }
}

impl GestureHandler for AutoWireTool {
    fn name(&self) -> &str {
        "AutoWire"
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn phase(&self) -> GesturePhase {
        self.phase
    }

    fn configure(&mut self, options: &WireToolsOptions) {
        self.enabled = options.auto_wire_enabled;
        self.splice_width = options.splice_outline_width;
        self.preview_width = options.wire_width_item;
        if !self.enabled {
            self.staged = None;
        }
    }

    fn handle(&mut self, event: &InputEvent, ctx: &mut ToolContext<'_>) -> HandlerResponse {
        match event {
            InputEvent::KeyDown(Key::Control) => {
                self.ctrl_held = true;
                if self.phase == GesturePhase::Idle {
                    self.phase = self.phase.next(GestureEvent::Arm);
                }
                HandlerResponse::PassThrough
            }
            InputEvent::KeyUp(Key::Control) => {
                self.ctrl_held = false;
                self.staged = None;
                self.dragged = None;
                self.phase = self.phase.next(GestureEvent::Disarm).next(GestureEvent::Settle);
                HandlerResponse::PassThrough
            }
            InputEvent::DragMoved { nodes, .. } => self.on_drag_moved(nodes, ctx),
            InputEvent::DragEnded => self.on_drag_ended(ctx),
            InputEvent::FocusLost if self.phase.is_live() => {
                self.cancel();
                HandlerResponse::Handled
            }
            _ => HandlerResponse::PassThrough,
        }
    }

    fn cancel(&mut self) {
        self.ctrl_held = false;
        self.staged = None;
        self.dragged = None;
        self.phase = self.phase.next(GestureEvent::FocusLost).next(GestureEvent::Settle);
    }

    fn paint_overlay(&self, scene: &mut OverlayScene, graph: &Graph) {
        let Some(resolution) = self.staged.filter(|_| self.phase.is_engaged()) else {
            return;
        };
        if let Some((output, input)) = graph.anchors(resolution.wire) {
            let geometry = WireGeometry::from_anchors(output, input);
            scene.push_wire(&geometry, self.splice_width, OverlayWireRole::SpliceTarget);
        }
        for connection in resolution.preview_connections() {
            if let Some((output, input)) = graph.anchors(connection) {
                let geometry = WireGeometry::from_anchors(output, input);
                scene.push_wire(&geometry, self.preview_width, OverlayWireRole::SplicePreview);
            }
        }
    }
}
