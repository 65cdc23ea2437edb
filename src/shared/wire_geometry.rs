//! Reine Geometrie eines Wires: kubische Bézier-Kurve zwischen zwei Port-Ankern.
//!
//! Layer-neutral: wird von Hit-Tests, Katalog, Tools und Overlay genutzt.
//! Es wird nichts zwischengespeichert; jede Abfrage baut die Kurve aus den
//! aktuellen Ankern neu auf.

use crate::core::Rect;
use glam::Vec2;

/// Horizontaler Zug pro vertikalem Versatz der Endpunkte.
const TORQUE_FACTOR: f32 = 0.75;
/// Horizontaler Zug pro horizontalem Abstand der Endpunkte.
const SPAN_FACTOR: f32 = 0.5;
/// Minimale Segmentanzahl eines Render-Streifens.
const MIN_STRIP_SEGMENTS: usize = 30;
/// Kurvenlänge pro Render-Segment.
const STRIP_SEGMENT_LENGTH: f32 = 1.5;

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// B'(t) = 3(1-t)²·(P1-P0) + 6(1-t)t·(P2-P1) + 3t²·(P3-P2)
pub fn cubic_bezier_derivative(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    3.0 * inv * inv * (p1 - p0) + 6.0 * inv * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

/// B''(t) = 6(1-t)·(P2 - 2P1 + P0) + 6t·(P3 - 2P2 + P1)
pub fn cubic_bezier_second_derivative(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    6.0 * (1.0 - t) * (p2 - 2.0 * p1 + p0) + 6.0 * t * (p3 - 2.0 * p2 + p1)
}

/// Standard-Taper für die wandernde Fokus-Einschnürung.
///
/// `exp(-cos(2π·u)^100 / 0.5)`: liegt fast überall bei 1 und fällt nur in
/// einem schmalen Fenster um `u ≡ 0 (mod ½)` auf `e^-2` ab. Aufrufer addieren
/// eine laufende Phase auf `u`.
pub fn focus_taper(u: f32) -> f32 {
    let c = (std::f32::consts::TAU * u).cos();
    (-c.powi(100) / 0.5).exp()
}

/// Ein gefülltes Viereck eines Render-Streifens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireQuad {
    /// Ecken: vorne-links, vorne-rechts, hinten-rechts, hinten-links
    pub corners: [Vec2; 4],
    /// Deckkraft 0..1 (1 = volle Wire-Farbe)
    pub opacity: f32,
}

/// Kubische Kurve eines Wires von einem Output-Anker zu einem Input-Anker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireGeometry {
    p0: Vec2,
    p1: Vec2,
    p2: Vec2,
    p3: Vec2,
}

impl WireGeometry {
    /// Baut die Kurve aus Output-Anker `output` und Input-Anker `input`.
    ///
    /// Der horizontale Zug der Kontrollpunkte wächst mit dem vertikalen
    /// Versatz, damit steil versetzte Ports keine scharfen Rückwärts-Schleifen
    /// bilden.
    pub fn from_anchors(output: Vec2, input: Vec2) -> Self {
        let span = Self::span(output, input);
        Self {
            p0: output,
            p1: output + Vec2::new(span, 0.0),
            p2: input - Vec2::new(span, 0.0),
            p3: input,
        }
    }

    /// `max(0.5·|Δx|, 0.75·|Δy|)`
    pub fn span(output: Vec2, input: Vec2) -> f32 {
        let delta = input - output;
        let torque = TORQUE_FACTOR * delta.y.abs();
        (SPAN_FACTOR * delta.x.abs()).max(torque)
    }

    /// Die vier Bézier-Kontrollpunkte `[P0, P1, P2, P3]`.
    pub fn control_points(&self) -> [Vec2; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Output-Anker (t = 0)
    pub fn start(&self) -> Vec2 {
        self.p0
    }

    /// Input-Anker (t = 1)
    pub fn end(&self) -> Vec2 {
        self.p3
    }

    pub fn point_at(&self, t: f32) -> Vec2 {
        // Endpunkte exakt liefern, ohne Rundungsfehler der Polynom-Auswertung
        if t <= 0.0 {
            return self.p0;
        }
        if t >= 1.0 {
            return self.p3;
        }
        cubic_bezier(self.p0, self.p1, self.p2, self.p3, t)
    }

    /// Erste Ableitung (nicht normiert).
    pub fn tangent_at(&self, t: f32) -> Vec2 {
        cubic_bezier_derivative(self.p0, self.p1, self.p2, self.p3, t.clamp(0.0, 1.0))
    }

    pub fn second_derivative_at(&self, t: f32) -> Vec2 {
        cubic_bezier_second_derivative(self.p0, self.p1, self.p2, self.p3, t.clamp(0.0, 1.0))
    }

    /// Punkt und Tangente bei `t ∈ [0, 1]`.
    pub fn evaluate(&self, t: f32) -> (Vec2, Vec2) {
        (self.point_at(t), self.tangent_at(t))
    }

    /// Einheits-Normale `unit(tangent.y, -tangent.x)`; Null-Vektor bei
    /// entarteter Tangente.
    pub fn normal_at(&self, t: f32) -> Vec2 {
        let tangent = self.tangent_at(t);
        Vec2::new(tangent.y, -tangent.x).normalize_or_zero()
    }

    /// `count + 1` gleichmäßig parametrisierte Punkte inkl. beider Endpunkte.
    pub fn divide(&self, count: usize) -> Vec<Vec2> {
        let count = count.max(1);
        (0..=count)
            .map(|i| self.point_at(i as f32 / count as f32))
            .collect()
    }

    /// Approximierte Kurvenlänge über Polylinien-Segmente.
    pub fn approx_length(&self, samples: usize) -> f32 {
        self.divide(samples)
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }

    /// Umschließendes Rechteck der Kontrollpunkte (konvexe Hülle enthält die Kurve).
    pub fn bounding_box(&self) -> Rect {
        Rect::from_corners(
            self.p0.min(self.p1).min(self.p2).min(self.p3),
            self.p0.max(self.p1).max(self.p2).max(self.p3),
        )
    }

    /// Geschlossenes Umriss-Polygon der Breite `width`.
    ///
    /// Jeder der `samples` Stützpunkte wird um `±(width/2)·(1 - taper(t))`
    /// entlang der Normale versetzt; erst der Vorwärts-Ring, dann der
    /// Rückwärts-Ring in umgekehrter Reihenfolge.
    pub fn outline(&self, width: f32, taper: impl Fn(f32) -> f32, samples: usize) -> Vec<Vec2> {
        let samples = samples.max(2);
        let half = width * 0.5;
        let last = (samples - 1) as f32;
        let mut polygon = vec![Vec2::ZERO; samples * 2];
        for i in 0..samples {
            let t = i as f32 / last;
            let (point, _) = self.evaluate(t);
            let offset = self.normal_at(t) * half * (1.0 - taper(t));
            polygon[i] = point + offset;
            polygon[samples * 2 - 1 - i] = point - offset;
        }
        polygon
    }

    /// Umriss konstanter Breite (für Regions-Hit-Tests).
    pub fn uniform_outline(&self, width: f32, samples: usize) -> Vec<Vec2> {
        self.outline(width, |_| 0.0, samples)
    }

    /// Render-Streifen mit wanderndem Fokus.
    ///
    /// Ein Viereck pro Segment; Breite und Deckkraft folgen
    /// `focus_taper(t + focus)`.
    pub fn render_strip(&self, width: f32, focus: f32) -> Vec<WireQuad> {
        let length = self.approx_length(64);
        let count = ((length / STRIP_SEGMENT_LENGTH) as usize).max(MIN_STRIP_SEGMENTS);
        let half = width * 0.5;

        let side = |t: f32| {
            let r = focus_taper(t + focus);
            let point = self.point_at(t);
            let offset = self.normal_at(t) * half * (1.0 - r);
            (point + offset, point - offset, r)
        };

        (0..count)
            .map(|i| {
                let (a0, b0, r0) = side(i as f32 / count as f32);
                let (a1, b1, r1) = side((i + 1) as f32 / count as f32);
                WireQuad {
                    corners: [a0, b0, b1, a1],
                    opacity: 1.0 - (r0 + r1) * 0.5,
                }
            })
            .collect()
    }
}
