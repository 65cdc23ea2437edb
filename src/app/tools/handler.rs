//! GestureHandler-Trait und die priorisierte Handler-Kette.

use super::{GesturePhase, InputEvent};
use crate::app::catalog::WireCatalog;
use crate::app::history::{EditHistory, Snapshot};
use crate::app::overlay::OverlayScene;
use crate::app::transaction::{CommitOutcome, EditError, EditNotifier, EditTransaction};
use crate::core::{Graph, Viewport};
use crate::shared::WireToolsOptions;
use std::sync::Arc;

/// Antwort eines Handlers auf ein Eingabe-Ereignis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Verbraucht, Kette endet hier
    Handled,
    /// Verbraucht; Handler erhält folgende Ereignisse zuerst
    Capture,
    /// Verbraucht; Handler gibt die Eingabe wieder frei
    Release,
    /// Nicht zuständig, nächster Handler
    PassThrough,
}

impl HandlerResponse {
    pub fn is_consumed(self) -> bool {
        self != HandlerResponse::PassThrough
    }
}

/// Alles, was ein Handler während eines Ereignisses lesen und ändern darf.
pub struct ToolContext<'a> {
    pub graph: &'a mut Arc<Graph>,
    pub viewport: &'a Viewport,
    pub options: &'a WireToolsOptions,
    pub notifier: &'a mut dyn EditNotifier,
    pub history: &'a mut EditHistory,
    failures: Vec<EditError>,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        graph: &'a mut Arc<Graph>,
        viewport: &'a Viewport,
        options: &'a WireToolsOptions,
        notifier: &'a mut dyn EditNotifier,
        history: &'a mut EditHistory,
    ) -> Self {
        Self {
            graph,
            viewport,
            options,
            notifier,
            history,
            failures: Vec::new(),
        }
    }

    /// Sichtbare Wires mit den Schwellwerten aus den Optionen.
    pub fn catalog(&self) -> WireCatalog<'_> {
        WireCatalog::new(&**self.graph, self.viewport).with_options(self.options)
    }

    /// Übernimmt eine Transaktion und legt bei Erfolg einen Undo-Snapshot ab.
    pub fn commit(&mut self, tx: EditTransaction) -> Result<CommitOutcome, EditError> {
        let before = Snapshot::new(&*self.graph, tx.label());
        let outcome = tx.commit(self.graph, &mut *self.notifier)?;
        if outcome == CommitOutcome::Performed {
            self.history.record_snapshot(before);
        }
        Ok(outcome)
    }

    /// Merkt einen Fehler für den Aufrufer der Kette vor.
    pub fn report(&mut self, error: EditError) {
        self.failures.push(error);
    }

    /// Gesammelte Fehler seit der Erstellung des Kontexts.
    pub fn take_failures(&mut self) -> Vec<EditError> {
        std::mem::take(&mut self.failures)
    }
}

/// Schnittstelle für alle Gesten (Knife, AutoWire, …).
///
/// Handler sind zustandsbehaftet und werden von der `HandlerChain` in
/// Prioritäts-Reihenfolge befragt.
pub trait GestureHandler {
    /// Anzeigename (Logging)
    fn name(&self) -> &str;

    /// Höhere Priorität wird zuerst befragt.
    fn priority(&self) -> i32 {
        0
    }

    /// Aktuelle Phase der Geste.
    fn phase(&self) -> GesturePhase;

    /// Übernimmt geänderte Optionen.
    fn configure(&mut self, _options: &WireToolsOptions) {}

    /// Ereignis verarbeiten.
    fn handle(&mut self, event: &InputEvent, ctx: &mut ToolContext<'_>) -> HandlerResponse;

    /// Laufende Geste verwerfen (ohne Commit).
    fn cancel(&mut self);

    /// Overlay-Elemente für den aktuellen Frame beitragen.
    fn paint_overlay(&self, _scene: &mut OverlayScene, _graph: &Graph) {}
}

/// Priorisierte Liste von Gesten-Handlern.
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn GestureHandler>>,
    captured: Option<usize>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen Handler. Gleiche Priorität: Registrierungs-Reihenfolge.
    pub fn register(&mut self, handler: Box<dyn GestureHandler>) {
        let priority = handler.priority();
        let index = self
            .handlers
            .iter()
            .position(|h| h.priority() < priority)
            .unwrap_or(self.handlers.len());
        self.handlers.insert(index, handler);
        // Capture-Index verschiebt sich mit
        if let Some(captured) = self.captured.as_mut() {
            if *captured >= index {
                *captured += 1;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler-Namen in Befragungs-Reihenfolge.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Name des Handlers, der die Eingabe gerade hält.
    pub fn captured_by(&self) -> Option<&str> {
        self.captured
            .and_then(|i| self.handlers.get(i))
            .map(|h| h.name())
    }

    /// Verteilt ein Ereignis.
    ///
    /// Ticks und Fokusverlust gehen an alle Handler. Sonst wird zuerst der
    /// Handler mit Capture befragt, danach alle übrigen in
    /// Prioritäts-Reihenfolge, bis einer das Ereignis verbraucht.
    pub fn dispatch(&mut self, event: &InputEvent, ctx: &mut ToolContext<'_>) -> HandlerResponse {
        if event.is_broadcast() {
            let mut response = HandlerResponse::PassThrough;
            for handler in &mut self.handlers {
                if handler.handle(event, ctx).is_consumed() {
                    response = HandlerResponse::Handled;
                }
            }
            if matches!(event, InputEvent::FocusLost) {
                self.captured = None;
            }
            return response;
        }

        let order: Vec<usize> = self
            .captured
            .into_iter()
            .chain((0..self.handlers.len()).filter(|&i| Some(i) != self.captured))
            .collect();

        for index in order {
            let response = self.handlers[index].handle(event, ctx);
            match response {
                HandlerResponse::PassThrough => continue,
                HandlerResponse::Capture => {
                    if self.captured != Some(index) {
                        log::debug!("Eingabe gehalten von '{}'", self.handlers[index].name());
                    }
                    self.captured = Some(index);
                }
                HandlerResponse::Release => {
                    if self.captured == Some(index) {
                        log::debug!("Eingabe freigegeben von '{}'", self.handlers[index].name());
                        self.captured = None;
                    }
                }
                HandlerResponse::Handled => {}
            }
            return response;
        }
        HandlerResponse::PassThrough
    }

    /// Reicht geänderte Optionen an alle Handler weiter.
    pub fn configure(&mut self, options: &WireToolsOptions) {
        for handler in &mut self.handlers {
            handler.configure(options);
        }
    }

    /// Bricht alle laufenden Gesten ab.
    pub fn cancel_all(&mut self) {
        for handler in &mut self.handlers {
            handler.cancel();
        }
        self.captured = None;
    }

    /// Sammelt die Overlay-Beiträge aller Handler.
    pub fn paint_overlay(&self, scene: &mut OverlayScene, graph: &Graph) {
        for handler in &self.handlers {
            handler.paint_overlay(scene, graph);
        }
    }
}
