//! Planar hit-test primitives, operating on already-projected map coordinates.

/// Even-odd crossing test. The ring does not need to be explicitly closed.
pub fn point_in_ring(pt: (f64, f64), ring: &[(f64, f64)]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];

        if (yi > pt.1) != (yj > pt.1)
            && pt.0 < (xj - xi) * (pt.1 - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Squared distance from a point to the closest point on segment a-b.
pub fn point_segment_distance_sq(pt: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((pt.0 - a.0) * dx + (pt.1 - a.1) * dy) / len_sq).max(0.0).min(1.0)
    };

    let (px, py) = (a.0 + t * dx - pt.0, a.1 + t * dy - pt.1);
    px * px + py * py
}
