//! Viewport (Zoom + sichtbarer Bereich) und achsenparallele Rechtecke.

use glam::Vec2;

/// Achsenparalleles Rechteck in Canvas-Koordinaten (min inklusiv, max inklusiv).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Erstellt ein Rechteck aus zwei beliebigen Ecken (wird normalisiert).
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Erstellt ein Rechteck aus linker oberer Ecke und Größe.
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::from_corners(min, min + size)
    }

    /// Kleinstes Rechteck, das alle Punkte enthält.
    pub fn bounding(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut min, mut max) = (*first, *first);
        for &p in rest {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Vergrößert das Rechteck um `margin` auf jeder Seite.
    pub fn inflate(&self, margin: Vec2) -> Self {
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Die vier Ecken im Uhrzeigersinn, beginnend bei `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Überlappen sich die Rechtecke (Berührung zählt)?
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Zustand der Ansicht: Zoom-Faktor und sichtbarer Bereich in Canvas-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Zoom-Level (1.0 = normal, 2.0 = doppelt so groß)
    pub zoom: f32,
    /// Sichtbarer Bereich in Canvas-Koordinaten
    pub visible: Rect,
}

impl Viewport {
    pub fn new(zoom: f32, visible: Rect) -> Self {
        Self { zoom, visible }
    }

    /// Umrechnung einer Canvas-Länge in Screen-Pixel.
    pub fn to_screen_length(&self, canvas_length: f32) -> f32 {
        canvas_length * self.zoom
    }

    /// Verschiebt den sichtbaren Bereich (Pan).
    pub fn pan(&mut self, delta: Vec2) {
        self.visible.min += delta;
        self.visible.max += delta;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            visible: Rect::from_corners(Vec2::ZERO, Vec2::new(1280.0, 720.0)),
        }
    }
}
