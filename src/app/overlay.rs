//! Overlay-Szene der Wire-Tools (Knife-Spur, Splice-Vorschau, Cursor).
//!
//! Tools erzeugen reine Daten; gezeichnet wird von einem Host-seitigen
//! `OverlayPainter`. Fehler des Painters werden an der Grenze geloggt und
//! unterbrechen nie die Eingabe-Verarbeitung.

use crate::shared::options::OUTLINE_SAMPLES;
use crate::shared::{WireGeometry, WireQuad};
use glam::Vec2;

/// Strichstärke der Knife-Spur.
pub const KNIFE_STROKE_WIDTH: f32 = 1.5;
/// Versatz des Knife-Cursors über der Zeigerposition.
pub const KNIFE_CURSOR_OFFSET: Vec2 = Vec2::new(0.0, -40.0);

/// Rolle eines Overlay-Wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayWireRole {
    /// Wire, in den eingefügt wird (mit wandernder Einschnürung)
    SpliceTarget,
    /// Neue Verbindung, die beim Commit entsteht
    SplicePreview,
}

/// Cursor-Symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCursor {
    Knife,
}

/// Ein zu zeichnendes Element.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayItem {
    /// Freihand-Spur (Polylinie) mit Strichstärke
    Stroke { points: Vec<Vec2>, width: f32 },
    /// Wire als Render-Streifen
    Wire {
        quads: Vec<WireQuad>,
        role: OverlayWireRole,
    },
    /// Cursor-Symbol an einer Canvas-Position (linke obere Ecke)
    Cursor {
        position: Vec2,
        cursor: OverlayCursor,
    },
}

/// Sammlung aller Overlay-Elemente eines Frames.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayScene {
    /// Phase der wandernden Fokus-Einschnürung (0..1, wird vom Host animiert)
    pub focus: f32,
    /// Stützpunkte für Vorschau-Streifen konstanter Breite
    pub outline_samples: usize,
    items: Vec<OverlayItem>,
}

impl Default for OverlayScene {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl OverlayScene {
    pub fn new(focus: f32) -> Self {
        Self {
            focus,
            outline_samples: OUTLINE_SAMPLES,
            items: Vec::new(),
        }
    }

    /// Setzt die Umriss-Auflösung (mindestens 2 Stützpunkte).
    pub fn with_outline_samples(mut self, samples: usize) -> Self {
        self.outline_samples = samples.max(2);
        self
    }

    pub fn push_stroke(&mut self, points: Vec<Vec2>, width: f32) {
        if points.len() > 1 {
            self.items.push(OverlayItem::Stroke { points, width });
        }
    }

    /// Fügt einen Wire als Render-Streifen hinzu; Vorschau-Wires mit konstanter Breite.
    pub fn push_wire(&mut self, geometry: &WireGeometry, width: f32, role: OverlayWireRole) {
        let quads = match role {
            OverlayWireRole::SpliceTarget => geometry.render_strip(width, self.focus),
            OverlayWireRole::SplicePreview => {
                uniform_quads(geometry, width, self.outline_samples)
            }
        };
        self.items.push(OverlayItem::Wire { quads, role });
    }

    pub fn push_cursor(&mut self, position: Vec2, cursor: OverlayCursor) {
        self.items.push(OverlayItem::Cursor { position, cursor });
    }

    pub fn items(&self) -> &[OverlayItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Streifen konstanter Breite aus dem Umriss-Polygon.
fn uniform_quads(geometry: &WireGeometry, width: f32, samples: usize) -> Vec<WireQuad> {
    let outline = geometry.uniform_outline(width, samples);
    let n = outline.len() / 2;
    (0..n.saturating_sub(1))
        .map(|i| WireQuad {
            corners: [
                outline[i],
                outline[2 * n - 1 - i],
                outline[2 * n - 2 - i],
                outline[i + 1],
            ],
            opacity: 1.0,
        })
        .collect()
}

/// Host-seitiger Zeichner der Overlay-Szene.
pub trait OverlayPainter {
    fn paint(&mut self, scene: &OverlayScene) -> anyhow::Result<()>;
}

/// Zeichnet die Szene; Fehler werden geloggt statt weitergereicht.
///
/// Gibt `true` zurück, wenn ohne Fehler gezeichnet wurde.
pub fn paint_guarded(painter: &mut dyn OverlayPainter, scene: &OverlayScene) -> bool {
    match painter.paint(scene) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Overlay konnte nicht gezeichnet werden: {:#}", e);
            false
        }
    }
}
