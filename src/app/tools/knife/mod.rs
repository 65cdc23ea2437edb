//! Knife: Wires durch eine Freihand-Geste trennen.
//!
//! **Ablauf:** Knife-Taste halten → Armed; Maustaste drücken → Active;
//! jede Bewegung hängt ein Sample an und prüft das jüngste Spur-Segment
//! gegen alle sichtbaren Wires. Der erste berührte Wire wird getrennt
//! (höchstens einer pro Sample). Die Spur klingt über einen festen Tick ab.

mod decay;
mod trail;

pub use decay::{DecayClock, StrokeDecay};
pub use trail::StrokeTrail;

use super::{
    GestureEvent, GestureHandler, GesturePhase, HandlerResponse, InputEvent, Key, ToolContext,
};
use crate::app::catalog::WireCatalog;
use crate::app::hit_test::is_touching_curve_within;
use crate::app::overlay::{OverlayCursor, OverlayScene, KNIFE_CURSOR_OFFSET, KNIFE_STROKE_WIDTH};
use crate::app::transaction::{CommitOutcome, EditError, EditNotifier, EditTransaction};
use crate::core::{Connection, Graph};
use crate::shared::WireToolsOptions;
use glam::Vec2;
use std::sync::Arc;
use std::time::Duration;

/// Trennt einen Wire als eigene Edit-Gruppe mit Neuberechnung ab dem Ziel-Node.
pub fn sever_wire(
    graph: &mut Arc<Graph>,
    wire: Connection,
    notifier: &mut dyn EditNotifier,
) -> Result<CommitOutcome, EditError> {
    let tx = stage_sever(graph, wire)?;
    tx.commit(graph, notifier)
}

fn stage_sever(graph: &Arc<Graph>, wire: Connection) -> Result<EditTransaction, EditError> {
    let mut tx = EditTransaction::begin(graph, "Wire trennen");
    tx.remove_source(wire.target, wire.source)?;
    if let Some(port) = graph.port(wire.target) {
        tx.schedule_recompute(port.node_id);
    }
    Ok(tx)
}

/// Gesten-Handler des Knife.
#[derive(Debug, Clone)]
pub struct KnifeTool {
    phase: GesturePhase,
    trail: StrokeTrail,
    decay: StrokeDecay,
    clock: DecayClock,
    key: char,
    tolerance: f32,
    cursor: Option<Vec2>,
}

impl Default for KnifeTool {
    fn default() -> Self {
        Self::new(&WireToolsOptions::default())
    }
}

impl KnifeTool {
    /// Priorität in der Handler-Kette (vor AutoWire).
    pub const PRIORITY: i32 = 20;

    pub fn new(options: &WireToolsOptions) -> Self {
        let mut tool = Self {
            phase: GesturePhase::Idle,
            trail: StrokeTrail::default(),
            decay: StrokeDecay::default(),
            clock: DecayClock::default(),
            key: options.knife_key,
            tolerance: options.curve_touch_tolerance,
            cursor: None,
        };
        tool.apply_options(options);
        tool
    }

    fn apply_options(&mut self, options: &WireToolsOptions) {
        self.trail.set_spacing(options.stroke_sample_spacing);
        self.decay = StrokeDecay::new(options.decay_patience_ticks, options.decay_trim_per_tick);
        self.clock.set_interval(options.decay_interval());
        self.key = options.knife_key;
        self.tolerance = options.curve_touch_tolerance;
    }

    pub fn trail(&self) -> &StrokeTrail {
        &self.trail
    }

    pub fn is_ticking(&self) -> bool {
        self.clock.is_running()
    }

    // ── Geste ───────────────────────────────────────────────────────

    /// Beginnt eine Spur: Samples leeren, Zähler zurücksetzen, Tick starten.
    pub fn start(&mut self) {
        self.trail.clear();
        self.decay.reset();
        self.clock.start();
    }

    /// Beendet die Spur ohne Commit.
    pub fn end(&mut self) {
        self.trail.clear();
        self.clock.stop();
    }

    /// Ein Decay-Tick. Gibt die Anzahl entfernter Samples zurück.
    pub fn decay_tick(&mut self) -> usize {
        self.decay.tick(&mut self.trail)
    }

    /// Führt alle seit dem letzten Aufruf fälligen Ticks aus.
    pub fn advance_clock(&mut self, elapsed: Duration) -> usize {
        let due = self.clock.advance(elapsed);
        let mut removed = 0;
        for _ in 0..due {
            if self.trail.is_empty() && self.decay.is_exhausted() {
                break;
            }
            removed += self.decay_tick();
        }
        removed
    }

    /// Erster sichtbarer Wire, den das jüngste Spur-Segment berührt.
    pub fn check_cut(&self, catalog: &WireCatalog<'_>) -> Option<Connection> {
        let curve = self.trail.cut_curve();
        if curve.is_empty() {
            return None;
        }
        catalog
            .visible_wires()
            .find(|(_, geometry)| is_touching_curve_within(geometry, &curve, self.tolerance))
            .map(|(wire, _)| wire)
    }

    /// Hängt ein Sample an und trennt ggf. den ersten berührten Wire.
    ///
    /// Gibt den getrennten Wire zurück. Ein abgelehnter Commit bricht die
    /// Geste ab.
    pub fn sample(&mut self, p: Vec2, ctx: &mut ToolContext<'_>) -> Option<Connection> {
        if !self.trail.push(p) {
            return None;
        }
        let wire = self.check_cut(&ctx.catalog())?;

        let result = stage_sever(&*ctx.graph, wire).and_then(|tx| ctx.commit(tx));
        match result {
            Ok(CommitOutcome::Performed) => {
                log::info!("Verbindung {}→{} getrennt", wire.source, wire.target);
                self.phase = self.phase.next(GestureEvent::Commit);
                Some(wire)
            }
            Ok(CommitOutcome::NotPerformed) => None,
            Err(e) => {
                log::warn!("Trennen von {}→{} fehlgeschlagen: {}", wire.source, wire.target, e);
                ctx.report(e);
                self.abandon();
                None
            }
        }
    }

    fn abandon(&mut self) {
        self.end();
        self.phase = self.phase.next(GestureEvent::Abort).next(GestureEvent::Settle);
        log::debug!("Knife-Geste abgebrochen");
    }

    fn is_knife_key(&self, key: Key) -> bool {
        key.is_char(self.key)
    }

    fn on_pointer_move(&mut self, position: Vec2, pressed: bool, ctx: &mut ToolContext<'_>) {
        self.cursor = Some(position);
        if !(pressed && self.phase.is_engaged()) {
            // Reste einer früheren Spur
            self.trail.clear();
            return;
        }
        if self.sample(position, ctx).is_none() && self.phase == GesturePhase::Committed {
            self.phase = self.phase.next(GestureEvent::Sample);
        }
    }
}

impl GestureHandler for KnifeTool {
    fn name(&self) -> &str {
        "Knife"
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn phase(&self) -> GesturePhase {
        self.phase
    }

    fn configure(&mut self, options: &WireToolsOptions) {
        self.apply_options(options);
    }

    fn handle(&mut self, event: &InputEvent, ctx: &mut ToolContext<'_>) -> HandlerResponse {
        match event {
            InputEvent::KeyDown(key) if self.is_knife_key(*key) => {
                if self.phase == GesturePhase::Idle {
                    self.phase = self.phase.next(GestureEvent::Arm);
                    log::debug!("Knife bereit");
                }
                HandlerResponse::Capture
            }
            InputEvent::KeyUp(key) if self.is_knife_key(*key) => {
                self.end();
                self.phase = self.phase.next(GestureEvent::Disarm).next(GestureEvent::Settle);
                self.cursor = None;
                HandlerResponse::Release
            }
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) if self.phase.is_live() => {
                HandlerResponse::Handled
            }
            InputEvent::PointerDown(position) if self.phase == GesturePhase::Armed => {
                self.cursor = Some(*position);
                self.start();
                self.phase = self.phase.next(GestureEvent::Begin);
                HandlerResponse::Handled
            }
            InputEvent::PointerMove { position, pressed } if self.phase.is_live() => {
                self.on_pointer_move(*position, *pressed, ctx);
                HandlerResponse::Handled
            }
            InputEvent::PointerUp(_) if self.phase.is_engaged() => {
                self.end();
                self.phase = self.phase.next(GestureEvent::End);
                HandlerResponse::Handled
            }
            InputEvent::Tick(elapsed) => {
                self.advance_clock(*elapsed);
                HandlerResponse::PassThrough
            }
            InputEvent::FocusLost if self.phase.is_live() => {
                self.cancel();
                HandlerResponse::Handled
            }
            _ => HandlerResponse::PassThrough,
        }
    }

    fn cancel(&mut self) {
        self.end();
        self.cursor = None;
        self.phase = self.phase.next(GestureEvent::FocusLost).next(GestureEvent::Settle);
    }

    fn paint_overlay(&self, scene: &mut OverlayScene, _graph: &Graph) {
        if !self.phase.is_live() {
            return;
        }
        if self.trail.len() > 1 {
            scene.push_stroke(self.trail.smoothed(), KNIFE_STROKE_WIDTH);
        }
        if let Some(cursor) = self.cursor {
            scene.push_cursor(cursor + KNIFE_CURSOR_OFFSET, OverlayCursor::Knife);
        }
    }
}
