//! Catmull-Rom-Splines für die Knife-Spur.
//!
//! Die Spur-Samples werden durch eine interpolierende Kurve verbunden, sowohl
//! für die Schnitt-Prüfung des jüngsten Segments als auch für das Overlay.

use glam::Vec2;

/// Berechnet einen Punkt auf einem Catmull-Rom-Segment (t ∈ [0, 1]).
///
/// p0, p1, p2, p3: vier aufeinanderfolgende Kontrollpunkte.
/// Die Kurve verläuft von p1 nach p2.
pub fn catmull_rom_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Kontrollpunkte für Segment `seg` (von `points[seg]` nach `points[seg + 1]`).
///
/// An den Rändern werden Phantom-Punkte gespiegelt.
fn segment_controls(points: &[Vec2], seg: usize) -> (Vec2, Vec2, Vec2, Vec2) {
    let n = points.len();
    let p1 = points[seg];
    let p2 = points[seg + 1];
    let p0 = if seg == 0 {
        2.0 * p1 - p2
    } else {
        points[seg - 1]
    };
    let p3 = if seg + 2 < n {
        points[seg + 2]
    } else {
        2.0 * p2 - p1
    };
    (p0, p1, p2, p3)
}

/// Dichte Punktliste entlang einer Catmull-Rom-Spline durch `points`.
///
/// `samples_per_segment`: Anzahl der Zwischenpunkte pro Segment (ohne Endpunkt).
pub fn catmull_rom_chain(points: &[Vec2], samples_per_segment: usize) -> Vec<Vec2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let steps = samples_per_segment.max(1);
    let n = points.len();
    let mut result = Vec::with_capacity((n - 1) * steps + 1);

    for seg in 0..(n - 1) {
        let (p0, p1, p2, p3) = segment_controls(points, seg);
        for i in 0..steps {
            let t = i as f32 / steps as f32;
            result.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }
    result.push(points[n - 1]);
    result
}

/// Nur das jüngste Segment (zwischen den letzten beiden Punkten) als Polylinie.
///
/// Nutzt die drei jüngsten Punkte plus gespiegeltem Phantom-Punkt als
/// Kontrollpunkte, damit die Krümmung der Geste erhalten bleibt.
pub fn catmull_rom_last_segment(points: &[Vec2], samples: usize) -> Vec<Vec2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let tail_start = points.len().saturating_sub(3);
    let tail = &points[tail_start..];
    let seg = tail.len() - 2;
    let (p0, p1, p2, p3) = segment_controls(tail, seg);

    let steps = samples.max(1);
    (0..=steps)
        .map(|i| catmull_rom_point(p0, p1, p2, p3, i as f32 / steps as f32))
        .collect()
}

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
