//! Polygon- und Segment-Hilfsfunktionen (Punkt-in-Polygon, Schnitt-Tests, Abstände).

use crate::core::Rect;
use glam::Vec2;

const EPS: f32 = 1e-6;

/// Prüft ob ein Punkt auf einem Liniensegment liegt.
fn point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> bool {
    let ab = b - a;
    let ap = point - a;
    if ab.perp_dot(ap).abs() > 1e-4 {
        return false;
    }
    let dot = ap.dot(ab);
    dot >= 0.0 && dot <= ab.length_squared()
}

/// Prüft ob ein Punkt innerhalb eines Polygons liegt (Ray-Casting, Rand zählt).
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let Some(&last) = polygon.last() else {
        return false;
    };
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut previous = last;

    for &current in polygon {
        if point_on_segment(point, previous, current) {
            return true;
        }

        let crosses = (current.y > point.y) != (previous.y > point.y);
        if crosses {
            let x_at = (previous.x - current.x) * (point.y - current.y) / (previous.y - current.y)
                + current.x;
            if point.x < x_at {
                inside = !inside;
            }
        }

        previous = current;
    }

    inside
}

fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn within_box(point: Vec2, seg_start: Vec2, seg_end: Vec2) -> bool {
    point.x >= seg_start.x.min(seg_end.x) - EPS
        && point.x <= seg_start.x.max(seg_end.x) + EPS
        && point.y >= seg_start.y.min(seg_end.y) - EPS
        && point.y <= seg_start.y.max(seg_end.y) + EPS
}

/// Schneiden sich zwei Segmente (inkl. Berührung und Kollinearität)?
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
        return true;
    }

    (o1.abs() <= EPS && within_box(b1, a1, a2))
        || (o2.abs() <= EPS && within_box(b2, a1, a2))
        || (o3.abs() <= EPS && within_box(a1, b1, b2))
        || (o4.abs() <= EPS && within_box(a2, b1, b2))
}

/// Prüft ob ein Liniensegment ein Rechteck schneidet oder darin liegt.
pub fn segment_intersects_rect(start: Vec2, end: Vec2, rect: &Rect) -> bool {
    if rect.contains_point(start) || rect.contains_point(end) {
        return true;
    }
    let [a, b, c, d] = rect.corners();
    segments_intersect(start, end, a, b)
        || segments_intersect(start, end, b, c)
        || segments_intersect(start, end, c, d)
        || segments_intersect(start, end, d, a)
}

/// Exakter Überlappungstest geschlossenes Polygon ⇔ Rechteck.
///
/// Wahr, wenn eine Polygon-Kante das Rechteck schneidet oder darin liegt,
/// oder das Rechteck vollständig im Polygon liegt.
pub fn polygon_intersects_rect(polygon: &[Vec2], rect: &Rect) -> bool {
    match polygon {
        [] => false,
        [p] => rect.contains_point(*p),
        _ => {
            let Some(&last) = polygon.last() else {
                return false;
            };
            let mut previous = last;
            for &current in polygon {
                if segment_intersects_rect(previous, current, rect) {
                    return true;
                }
                previous = current;
            }
            point_in_polygon(rect.center(), polygon)
        }
    }
}

/// Kürzester Abstand eines Punkts zu einem Segment.
pub fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < EPS {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Kürzester Abstand zwischen zwei Segmenten (0 bei Schnitt).
pub fn segment_segment_distance(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> f32 {
    if segments_intersect(a1, a2, b1, b2) {
        return 0.0;
    }
    point_segment_distance(a1, b1, b2)
        .min(point_segment_distance(a2, b1, b2))
        .min(point_segment_distance(b1, a1, a2))
        .min(point_segment_distance(b2, a1, a2))
}

/// Kürzester Abstand zwischen zwei Polylinien.
///
/// Eine Polylinie mit nur einem Punkt wird als Punkt behandelt; leere
/// Polylinien liefern `f32::INFINITY`.
pub fn polyline_distance(a: &[Vec2], b: &[Vec2]) -> f32 {
    match (a, b) {
        ([], _) | (_, []) => f32::INFINITY,
        ([p], [q]) => p.distance(*q),
        ([p], line) | (line, [p]) => line
            .windows(2)
            .map(|w| point_segment_distance(*p, w[0], w[1]))
            .fold(f32::INFINITY, f32::min),
        _ => {
            let mut best = f32::INFINITY;
            for sa in a.windows(2) {
                for sb in b.windows(2) {
                    best = best.min(segment_segment_distance(sa[0], sa[1], sb[0], sb[1]));
                    if best == 0.0 {
                        return 0.0;
                    }
                }
            }
            best
        }
    }
}
