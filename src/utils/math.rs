// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Unit normal of a triangle wound `p0 -> p1 -> p2`, or `None` when the
/// triangle is degenerate.
///
/// The triangle counts as degenerate when the cross product magnitude is at
/// most `tolerance` times the squared longest edge, which makes the test
/// independent of the mesh scale.
pub fn triangle_normal(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    tolerance: f64,
) -> Option<Vector3<f64>> {
    let e1 = p1 - p0;
    let e2 = p2 - p0;
    let cross = e1.cross(&e2);
    let area2 = cross.norm();

    let longest = e1
        .norm_squared()
        .max(e2.norm_squared())
        .max((p2 - p1).norm_squared());

    if !area2.is_finite() || area2 <= tolerance * longest || area2 == 0.0 {
        None
    } else {
        Some(cross / area2)
    }
}

/// Closest point to `point` on the segment `a`-`b`.
///
/// Returns the clamped parameter `t` in `[0, 1]` and `a + t (b - a)`, or `None`
/// for a zero-length segment. Clamped ends return the endpoint exactly.
pub fn closest_point_on_segment(
    point: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
) -> Option<(f64, Point3<f64>)> {
    let ab = b - a;
    let length_sq = ab.norm_squared();
    if length_sq == 0.0 || !length_sq.is_finite() {
        return None;
    }

    let t = ((point - a).dot(&ab) / length_sq).clamp(0.0, 1.0);
    let closest = if t == 0.0 {
        *a
    } else if t == 1.0 {
        *b
    } else {
        a + ab * t
    };
    Some((t, closest))
}
