//! Spur der jüngsten Cursor-Samples einer Knife-Geste.

use crate::shared::options::STROKE_SAMPLE_SPACING;
use crate::shared::spline_geometry::{catmull_rom_chain, catmull_rom_last_segment};
use glam::Vec2;

/// Auflösung des jüngsten Spur-Segments für die Schnitt-Prüfung.
const CUT_CURVE_SAMPLES: usize = 8;
/// Zwischenpunkte pro Segment für die Overlay-Darstellung.
const OVERLAY_SAMPLES_PER_SEGMENT: usize = 4;

/// Geordnete Cursor-Samples (ältestes zuerst).
///
/// Aufeinanderfolgende Samples liegen immer mehr als `spacing` auseinander.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeTrail {
    samples: Vec<Vec2>,
    spacing: f32,
}

impl Default for StrokeTrail {
    fn default() -> Self {
        Self::new(STROKE_SAMPLE_SPACING)
    }
}

impl StrokeTrail {
    pub fn new(spacing: f32) -> Self {
        Self {
            samples: Vec::new(),
            spacing: spacing.max(0.0),
        }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing.max(0.0);
    }

    /// Hängt `p` an, wenn es weiter als `spacing` vom letzten Sample entfernt ist.
    pub fn push(&mut self, p: Vec2) -> bool {
        match self.samples.last() {
            Some(last) if last.distance(p) <= self.spacing => false,
            _ => {
                self.samples.push(p);
                true
            }
        }
    }

    /// Entfernt bis zu `count` der ältesten Samples. Gibt die Anzahl entfernter zurück.
    pub fn trim_oldest(&mut self, count: usize) -> usize {
        let removed = count.min(self.samples.len());
        self.samples.drain(..removed);
        removed
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.samples
    }

    /// Die beiden jüngsten Samples (älteres zuerst).
    pub fn newest_segment(&self) -> Option<(Vec2, Vec2)> {
        match self.samples.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Kurze Catmull-Rom-Kurve über das jüngste Segment (leer bei < 2 Samples).
    pub fn cut_curve(&self) -> Vec<Vec2> {
        if self.samples.len() < 2 {
            return Vec::new();
        }
        catmull_rom_last_segment(&self.samples, CUT_CURVE_SAMPLES)
    }

    /// Geglättete Spur für das Overlay.
    pub fn smoothed(&self) -> Vec<Vec2> {
        catmull_rom_chain(&self.samples, OVERLAY_SAMPLES_PER_SEGMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_samples_are_dropped() {
        let mut trail = StrokeTrail::default();
        assert!(trail.push(Vec2::ZERO));
        assert!(!trail.push(Vec2::new(1.5, 0.0)));
        assert!(!trail.push(Vec2::new(2.0, 0.0)), "genau 2 ist nicht weiter als 2");
        assert!(trail.push(Vec2::new(2.5, 0.0)));
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn retained_samples_keep_spacing() {
        let mut trail = StrokeTrail::default();
        // Zitternde Bewegung mit kleinen Schritten
        for i in 0..400 {
            let t = i as f32 * 0.37;
            trail.push(Vec2::new(t * 1.3, (t * 0.9).sin() * 3.0));
        }
        assert!(trail.len() > 10);
        for w in trail.points().windows(2) {
            assert!(w[0].distance(w[1]) > 2.0);
        }
    }

    #[test]
    fn trim_removes_oldest_first() {
        let mut trail = StrokeTrail::default();
        for i in 0..15 {
            trail.push(Vec2::new(i as f32 * 5.0, 0.0));
        }
        assert_eq!(trail.trim_oldest(10), 10);
        assert_eq!(trail.points()[0], Vec2::new(50.0, 0.0));
        assert_eq!(trail.trim_oldest(10), 5);
        assert!(trail.is_empty());
        assert_eq!(trail.trim_oldest(10), 0);
    }

    #[test]
    fn cut_curve_needs_two_samples() {
        let mut trail = StrokeTrail::default();
        trail.push(Vec2::ZERO);
        assert!(trail.cut_curve().is_empty());
        assert_eq!(trail.newest_segment(), None);

        trail.push(Vec2::new(10.0, 0.0));
        let curve = trail.cut_curve();
        assert_eq!(curve.len(), CUT_CURVE_SAMPLES + 1);
        assert_eq!(trail.newest_segment(), Some((Vec2::ZERO, Vec2::new(10.0, 0.0))));
    }
}
