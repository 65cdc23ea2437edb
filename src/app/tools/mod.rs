//! Gesten-Handler für das Wire-Editing (Knife, AutoWire).
//!
//! Jede Geste implementiert den `GestureHandler`-Trait und wird in der
//! `HandlerChain` registriert. Tools mutieren den Graphen ausschließlich
//! über `EditTransaction`s, die atomar übernommen oder verworfen werden.

/// AutoWire: Einfügen eines gezogenen Objekts in einen bestehenden Wire.
pub mod auto_wire;
/// Gesten-Phasen als reine Zustandsmaschine.
mod gesture;
/// GestureHandler-Trait und priorisierte Kette.
mod handler;
/// Knife: Trennen von Wires durch eine Freihand-Geste.
pub mod knife;

pub use auto_wire::AutoWireTool;
pub use gesture::{GestureEvent, GesturePhase};
pub use handler::{GestureHandler, HandlerChain, HandlerResponse, ToolContext};
pub use knife::KnifeTool;

use crate::core::NodeId;
use glam::Vec2;
use std::time::Duration;

// ── Eingabe-Ereignisse ───────────────────────────────────────────

/// Taste, soweit für die Wire-Tools relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Zeichen-Taste (Kleinbuchstabe)
    Char(char),
    /// Control / Cmd
    Control,
    Escape,
}

impl Key {
    /// Vergleicht eine Zeichen-Taste ohne Beachtung der Groß-/Kleinschreibung.
    pub fn is_char(self, c: char) -> bool {
        matches!(self, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

/// Ein Eingabe-Ereignis des Host-Canvas (Canvas-Koordinaten).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Linke Maustaste gedrückt
    PointerDown(Vec2),
    /// Zeigerbewegung; `pressed` = linke Maustaste gehalten
    PointerMove { position: Vec2, pressed: bool },
    /// Linke Maustaste losgelassen
    PointerUp(Vec2),
    /// Der Host verschiebt die gezogenen Nodes um `delta`
    DragMoved { nodes: Vec<NodeId>, delta: Vec2 },
    /// Objekt-Drag beendet
    DragEnded,
    /// Vergangene Zeit seit dem letzten Tick
    Tick(Duration),
    /// Canvas hat den Fokus verloren
    FocusLost,
}

impl InputEvent {
    /// Ereignisse, die jeder Handler unabhängig von Capture erhält.
    pub fn is_broadcast(&self) -> bool {
        matches!(self, InputEvent::Tick(_) | InputEvent::FocusLost)
    }
}
