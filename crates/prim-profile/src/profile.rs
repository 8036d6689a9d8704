// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Profile curve generation
//!
//! Builds the 2D cross-section of a primitive from its shape descriptor:
//! the outer ring, an optional reversed inner ring for hollow shapes, and the
//! tagged faces the extrusion stage textures independently.

use crate::error::{Error, Result};
use crate::face::{FaceDescriptor, FaceTag};
use crate::options::GeneratorOptions;
use crate::tessellate::{tessellate_into, ArcClosure, ArcSpec};
use crate::Point2;
use nalgebra::Point3;
use prim_shape_model::{
    GenerationParameters, HoleShape, PackedShape, ProfileShape, ShapeDescriptor, MAX_OUTLINE_SIDES,
    MAX_SPLIT_COUNT, MIN_CIRCLE_SIDES, MIN_DETAIL_FACES,
};

/// Angle of the first square corner, in turns
const SQUARE_OFFSET: f32 = -0.375;

/// Slack so an end cut sitting exactly on a side boundary still counts that side
const SIDE_ROUNDING: f32 = 0.999;

/// Generated 2D cross-section of a primitive
///
/// Produced once per shape change and never mutated afterwards; a new shape
/// produces a new curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCurve {
    /// Outer ring, then the inner ring (reversed) when hollow
    pub points: Vec<Point2<f32>>,
    pub faces: Vec<FaceDescriptor>,
    /// Number of points on the outer boundary
    pub outer_count: usize,
    pub is_open: bool,
    pub is_concave: bool,
}

impl ProfileCurve {
    /// Total point count
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points of the outer boundary
    pub fn outer_points(&self) -> &[Point2<f32>] {
        &self.points[..self.outer_count]
    }

    /// Points of the inner boundary (empty unless hollow)
    pub fn inner_points(&self) -> &[Point2<f32>] {
        &self.points[self.outer_count..]
    }

    /// First face whose tag includes `tag`
    pub fn face(&self, tag: FaceTag) -> Option<&FaceDescriptor> {
        self.faces.iter().find(|f| f.tag.contains(tag))
    }

    /// Cap faces, in recording order
    pub fn caps(&self) -> impl Iterator<Item = &FaceDescriptor> {
        self.faces.iter().filter(|f| f.is_cap)
    }
}

/// Generate the profile curve of a shape with default options
///
/// # Errors
/// [`Error::InvalidShapeDescriptor`] when the cut spans less than `0.01`.
pub fn generate(shape: &ShapeDescriptor, params: &GenerationParameters) -> Result<ProfileCurve> {
    generate_with_options(shape, params, &GeneratorOptions::default())
}

/// Generate a profile curve straight from the wire fields
pub fn generate_packed(packed: &PackedShape, params: &GenerationParameters) -> Result<ProfileCurve> {
    let shape = packed.decode()?;
    generate(&shape, params)
}

/// Generate the profile curve of a shape
pub fn generate_with_options(
    shape: &ShapeDescriptor,
    params: &GenerationParameters,
    options: &GeneratorOptions,
) -> Result<ProfileCurve> {
    if let Err(err) = shape.validate() {
        log::warn!("rejecting {} profile: {}", shape.profile_shape, err);
        return Err(Error::from(err));
    }

    let mut builder = ProfileBuilder::new(shape, options);
    match shape.profile_shape {
        ProfileShape::Square => builder.square(params),
        ProfileShape::Triangle => builder.triangle(params),
        ProfileShape::Circle => builder.circle(params),
        ProfileShape::HalfCircle => builder.half_circle(params),
    }

    if params.path_is_open {
        builder.add_cap(FaceTag::PATH_END);
    }
    if builder.closure.is_open {
        builder.add_cut_faces();
    }

    let curve = builder.finish();
    log::debug!(
        "generated {} profile: {} points ({} outer), {} faces, open={}, concave={}",
        shape.profile_shape,
        curve.points.len(),
        curve.outer_count,
        curve.faces.len(),
        curve.is_open,
        curve.is_concave
    );
    Ok(curve)
}

/// Side count for a circular outline from its detail-scaled face count
fn circle_sides(detail_faces: f32) -> u32 {
    clamp_circle_sides(detail_faces as u32)
}

/// Keep circular outlines between a triangle and [`MAX_OUTLINE_SIDES`]
fn clamp_circle_sides(sides: u32) -> u32 {
    let clamped = sides.clamp(MIN_CIRCLE_SIDES, MAX_OUTLINE_SIDES);
    if clamped != sides {
        log::warn!("circle side count {} out of range, using {}", sides, clamped);
    }
    clamped
}

fn split_count(params: &GenerationParameters) -> u32 {
    let split = params.split_count;
    if split > MAX_SPLIT_COUNT {
        log::warn!("edge split {} out of range, using {}", split, MAX_SPLIT_COUNT);
        return MAX_SPLIT_COUNT;
    }
    split
}

/// Accumulates points and faces for one profile
struct ProfileBuilder<'a> {
    shape: &'a ShapeDescriptor,
    options: &'a GeneratorOptions,
    /// Points with their tessellation parameter in `z`
    points: Vec<Point3<f32>>,
    faces: Vec<FaceDescriptor>,
    /// Set once a hole is added
    outer_count: Option<usize>,
    closure: ArcClosure,
}

impl<'a> ProfileBuilder<'a> {
    fn new(shape: &'a ShapeDescriptor, options: &'a GeneratorOptions) -> Self {
        Self {
            shape,
            options,
            points: Vec::new(),
            faces: Vec::new(),
            outer_count: None,
            closure: ArcClosure::default(),
        }
    }

    fn hollow(&self) -> f32 {
        self.shape.profile_hollow
    }

    fn is_hollow(&self) -> bool {
        self.shape.is_hollow()
    }

    /// Hole shape, or `Same` for solid shapes
    fn hole_shape(&self) -> HoleShape {
        if self.is_hollow() {
            self.shape.hole_shape
        } else {
            HoleShape::Same
        }
    }

    fn tessellate(&mut self, arc: ArcSpec) {
        let close_fan = !self.is_hollow();
        self.closure = tessellate_into(
            &mut self.points,
            self.shape.profile_begin,
            self.shape.profile_end,
            &arc,
            close_fan,
        );
    }

    fn add_cap(&mut self, tag: FaceTag) {
        self.faces.push(FaceDescriptor::cap(self.points.len(), tag));
    }

    fn add_face(&mut self, start: usize, count: usize, u_scale: f32, tag: FaceTag, flat: bool) {
        self.faces.push(FaceDescriptor::side(start, count, u_scale, tag, flat));
    }

    /// Append the inner ring, scaled by `hollow` and wound opposite the outer ring
    fn add_hole(&mut self, arc: ArcSpec, hollow: f32, flat: bool) {
        let outer = self.points.len();
        self.outer_count = Some(outer);

        self.tessellate(arc);
        let inner = self.points.len() - outer;
        self.add_face(outer, inner, 0.0, FaceTag::INNER_SIDE, flat);

        for p in &mut self.points[outer..] {
            p.coords *= hollow;
        }
        self.points[outer..].reverse();

        // Caps now trace the outer ring and the inner ring
        for face in self.faces.iter_mut().filter(|f| f.is_cap) {
            face.vertex_count *= 2;
        }
    }

    /// One flat face per polygon side the cut touches
    fn add_outer_sides(&mut self, sides: f32, split: u32) {
        let first = (self.shape.profile_begin * sides).floor() as i32;
        let last = (self.shape.profile_end * sides + SIDE_ROUNDING).floor() as i32;
        let per_side = split as usize + 1;

        for (face_num, side) in (first..last).enumerate() {
            let tag = self.options.outer_side_tag(side.max(0) as u32);
            self.add_face(face_num * per_side, per_side + 1, 1.0, tag, true);
        }
    }

    /// A single smooth face over the whole circular ring
    fn add_ring_face(&mut self) {
        let count = if self.closure.is_open && !self.is_hollow() {
            // Skip the fan center
            self.points.len().saturating_sub(1)
        } else {
            self.points.len()
        };
        self.add_face(0, count, 0.0, FaceTag::OUTER_SIDE_0, false);
    }

    fn rescale(&mut self, factor: f32) {
        for p in &mut self.points {
            p.coords *= factor;
        }
    }

    fn square(&mut self, params: &GenerationParameters) {
        let split = split_count(params);
        self.tessellate(ArcSpec::polygon(4, SQUARE_OFFSET, 1.0, split));
        if params.path_is_open {
            self.add_cap(FaceTag::PATH_BEGIN);
        }
        self.add_outer_sides(4.0, split);
        self.rescale(4.0);

        if self.is_hollow() {
            let hollow = self.hollow();
            match self.hole_shape() {
                HoleShape::Triangle => {
                    self.add_hole(ArcSpec::polygon(3, SQUARE_OFFSET, 1.0, split), hollow, true)
                }
                HoleShape::Circle => {
                    let sides = circle_sides(MIN_DETAIL_FACES * params.detail);
                    self.add_hole(ArcSpec::circle(sides, SQUARE_OFFSET, 1.0), hollow, false)
                }
                HoleShape::Same | HoleShape::Square => {
                    self.add_hole(ArcSpec::polygon(4, SQUARE_OFFSET, 1.0, split), hollow, true)
                }
            }
        }
    }

    fn triangle(&mut self, params: &GenerationParameters) {
        let split = split_count(params);
        self.tessellate(ArcSpec::polygon(3, 0.0, 1.0, split));
        self.rescale(3.0);
        if params.path_is_open {
            self.add_cap(FaceTag::PATH_BEGIN);
        }
        self.add_outer_sides(3.0, split);

        if self.is_hollow() {
            // A triangle fills less of its bounding box, so its hole shrinks too
            let hollow = self.hollow() / 2.0;
            match self.hole_shape() {
                HoleShape::Circle => {
                    let sides = circle_sides(MIN_DETAIL_FACES * params.detail);
                    self.add_hole(ArcSpec::circle(sides, 0.0, 1.0), hollow, false)
                }
                HoleShape::Square => self.add_hole(ArcSpec::polygon(4, 0.0, 1.0, split), hollow, true),
                HoleShape::Same | HoleShape::Triangle => {
                    self.add_hole(ArcSpec::polygon(3, 0.0, 1.0, split), hollow, true)
                }
            }
        }
    }

    fn circle(&mut self, params: &GenerationParameters) {
        let hole = self.hole_shape();
        let mut detail_faces = MIN_DETAIL_FACES * params.detail;
        if hole == HoleShape::Square {
            // Line the ring up with the square's corners
            detail_faces = (detail_faces / 4.0).ceil() * 4.0;
        }
        let sides = if params.is_sculpted {
            clamp_circle_sides(params.sculpt_sides)
        } else {
            circle_sides(detail_faces)
        };

        self.tessellate(ArcSpec::circle(sides, 0.0, 1.0));
        if params.path_is_open {
            self.add_cap(FaceTag::PATH_BEGIN);
        }
        self.add_ring_face();

        if self.is_hollow() {
            let hollow = self.hollow();
            let split = split_count(params);
            match hole {
                HoleShape::Square => self.add_hole(ArcSpec::polygon(4, 0.375, 1.0, split), hollow, true),
                HoleShape::Triangle => self.add_hole(ArcSpec::polygon(3, 0.0, 1.0, split), hollow, true),
                HoleShape::Same | HoleShape::Circle => {
                    self.add_hole(ArcSpec::circle(sides, 0.0, 1.0), hollow, false)
                }
            }
        }
    }

    fn half_circle(&mut self, params: &GenerationParameters) {
        let hole = self.hole_shape();
        let mut detail_faces = MIN_DETAIL_FACES * params.detail * 0.5;
        if hole == HoleShape::Square {
            detail_faces = (detail_faces / 2.0).ceil() * 2.0;
        }
        let sides = circle_sides(detail_faces);

        self.tessellate(ArcSpec::circle(sides, 0.5, 0.5));
        if params.path_is_open {
            self.add_cap(FaceTag::PATH_BEGIN);
        }
        self.add_ring_face();

        if self.is_hollow() {
            let hollow = self.hollow();
            let split = split_count(params);
            match hole {
                HoleShape::Square => self.add_hole(ArcSpec::polygon(2, 0.5, 0.5, split), hollow, true),
                HoleShape::Triangle => self.add_hole(ArcSpec::polygon(3, 0.5, 0.5, split), hollow, true),
                HoleShape::Same | HoleShape::Circle => {
                    self.add_hole(ArcSpec::circle(sides, 0.5, 0.5), hollow, false)
                }
            }
        }

        if self.shape.cut_span() < self.options.half_circle_full_span {
            self.closure.is_open = true;
        } else if !self.is_hollow() {
            self.closure.is_open = false;
            if let Some(&first) = self.points.first() {
                self.points.push(first);
            }
        }
    }

    /// Two-point faces across the cut, from the last point back to the
    /// boundary that ends the outer ring
    fn add_cut_faces(&mut self) {
        let total = self.points.len();
        self.add_face(total.saturating_sub(1), 2, 0.5, FaceTag::PROFILE_BEGIN, true);

        let end_start = match self.outer_count {
            Some(outer) => outer.saturating_sub(1),
            None => total.saturating_sub(2),
        };
        self.add_face(end_start, 2, 0.5, FaceTag::PROFILE_END, true);
    }

    fn finish(self) -> ProfileCurve {
        let outer_count = self.outer_count.unwrap_or(self.points.len());
        ProfileCurve {
            points: self.points.iter().map(|p| p.xy()).collect(),
            faces: self.faces,
            outer_count,
            is_open: self.closure.is_open,
            is_concave: self.closure.is_concave,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn shape(profile: ProfileShape) -> ShapeDescriptor {
        ShapeDescriptor::new(profile, HoleShape::Same)
    }

    #[test]
    fn test_unit_box() {
        let curve = generate(&shape(ProfileShape::Square), &GenerationParameters::default()).unwrap();

        assert_eq!(curve.len(), 5);
        assert!(!curve.is_open);
        assert!(!curve.is_concave);
        assert_eq!(curve.faces.len(), 4);
        for (i, face) in curve.faces.iter().enumerate() {
            assert_eq!(face.start_index, i);
            assert_eq!(face.vertex_count, 2);
            assert_eq!(face.tag, FaceTag::outer_side(i as u32));
            assert!(face.is_flat);
        }
        // Square family coordinates carry the x4 rescale
        assert_abs_diff_eq!(curve.points[0].x, -2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(curve.points[0].y, -2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_open_path_caps() {
        let params = GenerationParameters::default().with_open_path(true);
        let curve = generate(&shape(ProfileShape::Square), &params).unwrap();

        let begin = curve.face(FaceTag::PATH_BEGIN).unwrap();
        let end = curve.face(FaceTag::PATH_END).unwrap();
        assert!(begin.is_cap && end.is_cap);
        assert_eq!(begin.vertex_count, 5);
        assert_eq!(end.vertex_count, 5);
        assert_eq!(curve.faces.first(), Some(begin));
        assert_eq!(curve.faces.last(), Some(end));
    }

    #[test]
    fn test_cut_box_is_open_fan() {
        let cut = shape(ProfileShape::Square).with_cut(0.0, 0.5);
        let curve = generate(&cut, &GenerationParameters::default()).unwrap();

        // Three corners plus the fan center
        assert_eq!(curve.len(), 4);
        assert!(curve.is_open);
        assert!(!curve.is_concave);
        assert_eq!(*curve.points.last().unwrap(), Point2::origin());

        let begin = curve.face(FaceTag::PROFILE_BEGIN).unwrap();
        let end = curve.face(FaceTag::PROFILE_END).unwrap();
        assert_eq!((begin.start_index, begin.vertex_count), (3, 2));
        assert_eq!((end.start_index, end.vertex_count), (2, 2));
        assert_eq!(begin.u_scale, 0.5);
    }

    #[test]
    fn test_hollow_box_reverses_inner_ring() {
        let hollow = shape(ProfileShape::Square).with_hollow(0.5);
        let curve = generate(&hollow, &GenerationParameters::default()).unwrap();

        assert_eq!(curve.outer_count, 5);
        assert_eq!(curve.inner_points().len(), 5);

        let inner = curve.face(FaceTag::INNER_SIDE).unwrap();
        assert_eq!((inner.start_index, inner.vertex_count), (5, 5));

        // Inner ring is not rescaled, and runs backwards
        let last = curve.points[9];
        assert_abs_diff_eq!(last.x, -0.25, epsilon = 1e-5);
        assert_abs_diff_eq!(last.y, -0.25, epsilon = 1e-5);
        let second_last = curve.points[8];
        assert_abs_diff_eq!(second_last.x, 0.25, epsilon = 1e-5);
        assert_abs_diff_eq!(second_last.y, -0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_triangle_hollow_is_halved() {
        let hollow = shape(ProfileShape::Triangle).with_hollow(0.5);
        let curve = generate(&hollow, &GenerationParameters::default()).unwrap();

        assert_eq!(curve.outer_count, 4);
        for p in curve.outer_points() {
            assert_abs_diff_eq!(p.coords.norm(), 1.5, epsilon = 1e-4);
        }
        for p in curve.inner_points() {
            assert_abs_diff_eq!(p.coords.norm(), 0.125, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_circle_sides_follow_detail() {
        let circle = shape(ProfileShape::Circle);
        let low = generate(&circle, &GenerationParameters::for_lod(0)).unwrap();
        let high = generate(&circle, &GenerationParameters::for_lod(3)).unwrap();

        assert_eq!(low.len(), 7);
        assert_eq!(high.len(), 25);
        let ring = high.face(FaceTag::OUTER_SIDE_0).unwrap();
        assert_eq!(ring.vertex_count, 25);
        assert!(!ring.is_flat);
        for p in &high.points {
            assert_abs_diff_eq!(p.coords.norm(), 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_circle_square_hole_snaps_sides() {
        let params = GenerationParameters::default().with_detail(1.5);
        let solid = generate(&shape(ProfileShape::Circle), &params).unwrap();
        assert_eq!(solid.len(), 10);

        let hollow = ShapeDescriptor::new(ProfileShape::Circle, HoleShape::Square).with_hollow(0.5);
        let curve = generate(&hollow, &params).unwrap();
        // 9 sides snap up to 12
        assert_eq!(curve.outer_count, 13);
        assert_eq!(curve.inner_points().len(), 5);
    }

    #[test]
    fn test_sculpt_sides_override() {
        let params = GenerationParameters::default().with_sculpt_sides(16);
        let curve = generate(&shape(ProfileShape::Circle), &params).unwrap();
        assert_eq!(curve.len(), 17);
    }

    #[test]
    fn test_low_side_counts_clamp_to_triangle() {
        let circle = shape(ProfileShape::Circle);

        let coarse = generate(&circle, &GenerationParameters::default().with_detail(0.2)).unwrap();
        assert!(!coarse.is_open);
        assert_eq!(coarse.len(), 4);

        for sides in [0, 1, 2] {
            let params = GenerationParameters::default().with_sculpt_sides(sides);
            let curve = generate(&circle, &params).unwrap();
            assert!(!curve.is_open);
            assert_eq!(curve.len(), 4, "sculpt sides {}", sides);
        }

        let half = generate(&shape(ProfileShape::HalfCircle), &GenerationParameters::default().with_detail(0.1)).unwrap();
        assert!(half.len() >= 3);
    }

    #[test]
    fn test_high_counts_are_bounded() {
        let params = GenerationParameters::default().with_sculpt_sides(100_000);
        let curve = generate(&shape(ProfileShape::Circle), &params).unwrap();
        assert_eq!(curve.len(), MAX_OUTLINE_SIDES as usize + 1);

        let params = GenerationParameters::default().with_split(10_000);
        let curve = generate(&shape(ProfileShape::Square), &params).unwrap();
        assert_eq!(curve.len(), 4 * (MAX_SPLIT_COUNT as usize + 1) + 1);
        assert_eq!(curve.faces[0].vertex_count, MAX_SPLIT_COUNT as usize + 2);
    }

    #[test]
    fn test_half_circle_square_hole_snaps_to_even() {
        let hollow = ShapeDescriptor::new(ProfileShape::HalfCircle, HoleShape::Square).with_hollow(0.5);
        let params = GenerationParameters::default().with_detail(1.5);
        let curve = generate(&hollow, &params).unwrap();

        // 4.5 sides round up to 6, the hole is a two-sided half square
        assert_eq!(curve.outer_count, 7);
        assert_eq!(curve.inner_points().len(), 3);
        for p in curve.inner_points() {
            assert_abs_diff_eq!(p.coords.norm(), 0.707107 * 0.5, epsilon = 1e-5);
        }

        let inner = curve.face(FaceTag::INNER_SIDE).unwrap();
        assert_eq!((inner.start_index, inner.vertex_count), (7, 3));
        assert!(inner.is_flat);
    }

    #[test]
    fn test_half_circle_triangle_hole() {
        let hollow = ShapeDescriptor::new(ProfileShape::HalfCircle, HoleShape::Triangle).with_hollow(0.5);
        let curve = generate(&hollow, &GenerationParameters::default()).unwrap();

        assert_eq!(curve.outer_count, 4);
        assert_eq!(curve.inner_points().len(), 4);
        // Three sides over half a turn count as a hexagon
        for p in curve.inner_points() {
            assert_abs_diff_eq!(p.coords.norm(), 0.525 * 0.5, epsilon = 1e-5);
        }

        let inner = curve.face(FaceTag::INNER_SIDE).unwrap();
        assert_eq!((inner.start_index, inner.vertex_count), (4, 4));
    }

    #[test]
    fn test_open_circle_ring_skips_center() {
        let cut = shape(ProfileShape::Circle).with_cut(0.0, 0.5);
        let curve = generate(&cut, &GenerationParameters::default()).unwrap();

        assert!(curve.is_open);
        let ring = curve.face(FaceTag::OUTER_SIDE_0).unwrap();
        assert_eq!(ring.vertex_count, curve.len() - 1);
    }

    #[test]
    fn test_half_circle_closes_full_span() {
        let curve = generate(&shape(ProfileShape::HalfCircle), &GenerationParameters::default()).unwrap();

        // Three sides: four arc points, the center, then the first point again
        assert!(!curve.is_open);
        assert_eq!(curve.len(), 6);
        assert_eq!(curve.points[0], curve.points[5]);
        assert_eq!(curve.points[4], Point2::origin());
        assert!(curve.face(FaceTag::PROFILE_BEGIN).is_none());
    }

    #[test]
    fn test_half_circle_cut_stays_open() {
        let cut = shape(ProfileShape::HalfCircle).with_cut(0.0, 0.8);
        let curve = generate(&cut, &GenerationParameters::default()).unwrap();
        assert!(curve.is_open);
        assert!(curve.face(FaceTag::PROFILE_BEGIN).is_some());
        assert!(curve.face(FaceTag::PROFILE_END).is_some());
    }

    #[test]
    fn test_half_circle_full_span_option() {
        let cut = shape(ProfileShape::HalfCircle).with_cut(0.0, 0.8);
        let options = GeneratorOptions::new().with_half_circle_full_span(0.75);
        let curve = generate_with_options(&cut, &GenerationParameters::default(), &options).unwrap();
        assert!(!curve.is_open);
        assert_eq!(curve.points.first(), curve.points.last());
    }

    #[test]
    fn test_rejects_narrow_cut() {
        let narrow = shape(ProfileShape::Circle).with_cut(0.5, 0.505);
        let err = generate(&narrow, &GenerationParameters::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidShapeDescriptor(_)));
    }

    #[test]
    fn test_packed_unknown_shape() {
        let packed = PackedShape {
            profile_curve: 0x06,
            ..Default::default()
        };
        let err = generate_packed(&packed, &GenerationParameters::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidShapeDescriptor(_)));
    }
}
