// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arc tessellation
//!
//! Approximates a (possibly cut) n-sided "circular" outline. Side 0 starts at
//! angle `offset` turns and the outline runs counter-clockwise from there.
//! Arithmetic is single precision with incrementally advanced angles, so the
//! emitted vertices match what deployed viewers and physics engines compute
//! for the same shape.

use crate::Point2;
use nalgebra::Point3;
use prim_shape_model::{MAX_OUTLINE_SIDES, MAX_SPLIT_COUNT};
use std::f32::consts::PI;

/// Radius scale by total side count, so small polygons roughly fill the
/// unit bounding box. Index 3 is the triangle, 4 the square.
pub const RADIUS_TABLE: [f32; 8] = [1.0, 1.0, 1.0, 0.5, 0.707107, 0.53, 0.525, 0.5];

/// Radius scale for outlines with eight or more sides
pub const DEFAULT_RADIUS: f32 = 0.5;

/// Begin fractions at or above this lie on the next vertex and add no point
const BEGIN_EDGE_LIMIT: f32 = 0.9999;

/// End fractions at or below this lie on the last vertex and add no point
const END_EDGE_LIMIT: f32 = 0.0001;

/// Covered fraction below which the outline is open
const FULL_RING_COVERAGE: f32 = 0.99;

/// Covered fraction above which an open outline is concave
const CONCAVE_COVERAGE: f32 = 0.5;

/// Parameters of one tessellated outline
///
/// `sides` is bounded to `[1, MAX_OUTLINE_SIDES]` and `split` to
/// `MAX_SPLIT_COUNT` when tessellating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    /// Sides per full turn of the tessellation parameter
    pub sides: u32,
    /// Angle of the first side, in turns
    pub offset: f32,
    /// Fraction of the full circle the parameter range `[0, 1]` covers
    pub ang_scale: f32,
    /// Extra points inserted along each edge
    pub split: u32,
}

impl ArcSpec {
    /// A polygonal outline whose edges are subdivided
    pub fn polygon(sides: u32, offset: f32, ang_scale: f32, split: u32) -> Self {
        Self {
            sides,
            offset,
            ang_scale,
            split,
        }
    }

    /// A circular outline; circles are never subdivided
    pub fn circle(sides: u32, offset: f32, ang_scale: f32) -> Self {
        Self::polygon(sides, offset, ang_scale, 0)
    }
}

/// Open/concave classification of a tessellated outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArcClosure {
    pub is_open: bool,
    pub is_concave: bool,
}

/// A stand-alone tessellated outline
#[derive(Debug, Clone)]
pub struct ArcTessellation {
    pub points: Vec<Point2<f32>>,
    pub closure: ArcClosure,
}

/// Radius scale for an outline of `sides` sides covering `ang_scale` of a turn
#[inline]
pub fn radius_scale(sides: u32, ang_scale: f32) -> f32 {
    let total_sides = (sides as f32 / ang_scale).round();
    if total_sides < RADIUS_TABLE.len() as f32 {
        RADIUS_TABLE[total_sides as usize]
    } else {
        DEFAULT_RADIUS
    }
}

/// Tessellate the `[begin, end]` cut of an outline.
///
/// When the cut leaves the outline open and `close_fan` is set, the center
/// point is appended so the outline closes into a fan.
pub fn tessellate_arc(begin: f32, end: f32, arc: &ArcSpec, close_fan: bool) -> ArcTessellation {
    let mut scratch = Vec::new();
    let closure = tessellate_into(&mut scratch, begin, end, arc, close_fan);

    ArcTessellation {
        points: scratch.iter().map(|p| p.xy()).collect(),
        closure,
    }
}

/// Append the tessellated cut to `points`.
///
/// Each point carries its tessellation parameter in `z`. Edge subdivision
/// interpolates from whatever point is last in `points`, so an inner ring
/// appended after an outer ring continues from it.
pub(crate) fn tessellate_into(
    points: &mut Vec<Point3<f32>>,
    begin: f32,
    end: f32,
    arc: &ArcSpec,
    close_fan: bool,
) -> ArcClosure {
    let sides = arc.sides.clamp(1, MAX_OUTLINE_SIDES);
    let split = arc.split.min(MAX_SPLIT_COUNT);
    let sides_f = sides as f32;
    let scale = radius_scale(sides, arc.ang_scale);

    let t_step = 1.0 / sides_f;
    let ang_step = 2.0 * PI * t_step * arc.ang_scale;
    let vertex = |t: f32, ang: f32| Point3::new(ang.cos() * scale, ang.sin() * scale, t);

    let t_first = (begin * sides_f).floor() / sides_f;

    // pt1 opens the side holding `begin`, pt2 closes it
    let mut t = t_first;
    let mut ang = 2.0 * PI * (t * arc.ang_scale + arc.offset);
    let mut pt1 = vertex(t, ang);

    t += t_step;
    ang += ang_step;
    let pt2 = vertex(t, ang);

    let t_fraction = (begin - t_first) * sides_f;
    if t_fraction < BEGIN_EDGE_LIMIT {
        points.push(lerp(&pt1, &pt2, t_fraction));
    }

    while t < end {
        pt1 = vertex(t, ang);
        push_split(points, &pt1, split);
        points.push(pt1);

        t += t_step;
        ang += ang_step;
    }

    // pt1 is now the last whole vertex, pt2 the one past `end`
    let pt2 = vertex(t, ang);
    let t_fraction = (end - (t - t_step)) * sides_f;
    if t_fraction > END_EDGE_LIMIT {
        let end_pt = lerp(&pt1, &pt2, t_fraction);
        push_split(points, &end_pt, split);
        points.push(end_pt);
    }

    let coverage = (end - begin) * arc.ang_scale;
    if coverage < FULL_RING_COVERAGE {
        if close_fan {
            points.push(Point3::origin());
        }
        ArcClosure {
            is_open: true,
            is_concave: coverage > CONCAVE_COVERAGE,
        }
    } else {
        ArcClosure::default()
    }
}

#[inline]
fn lerp(a: &Point3<f32>, b: &Point3<f32>, u: f32) -> Point3<f32> {
    a + (b - a) * u
}

/// Insert `split` evenly spaced points between the last point and `next`
fn push_split(points: &mut Vec<Point3<f32>>, next: &Point3<f32>, split: u32) {
    let Some(&last) = points.last() else {
        return;
    };

    let step = 1.0 / (split + 1) as f32;
    for i in 0..split {
        points.push(last + (next - last) * step * (i + 1) as f32);
    }
}
