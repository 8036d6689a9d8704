// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types describing a primitive's profile
//!
//! These values arrive from the owning scene object whenever its shape is
//! edited, and are consumed read-only by the profile generator.

use crate::{Result, ShapeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest span allowed between profile begin and end
pub const MIN_CUT_SPAN: f32 = 0.01;

/// Largest hollow fraction a shape may carry
pub const MAX_HOLLOW: f32 = 0.95;

/// Circle-family side count per unit of detail
pub const MIN_DETAIL_FACES: f32 = 6.0;

/// Detail scales for the four viewer levels of detail (lowest first)
pub const DETAIL_SCALES: [f32; 4] = [1.0, 1.5, 2.5, 4.0];

/// Fewest sides a circular outline is tessellated with
pub const MIN_CIRCLE_SIDES: u32 = 3;

/// Most sides any outline is tessellated with
pub const MAX_OUTLINE_SIDES: u32 = 1024;

/// Most extra points inserted along one edge
pub const MAX_SPLIT_COUNT: u32 = 64;

/// Shape family of the profile cross-section
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileShape {
    Circle,
    Square,
    /// Isometric, right and equilateral triangles all share this path
    Triangle,
    HalfCircle,
}

impl ProfileShape {
    /// Decode the low nibble of a packed profile-curve byte
    pub fn from_code(code: u8) -> Result<Self> {
        match code & 0x0f {
            0 => Ok(ProfileShape::Circle),
            1 => Ok(ProfileShape::Square),
            2..=4 => Ok(ProfileShape::Triangle),
            5 => Ok(ProfileShape::HalfCircle),
            other => Err(ShapeError::UnknownProfileShape(other)),
        }
    }

    /// Wire code for this shape (triangles encode as isometric)
    pub fn code(self) -> u8 {
        match self {
            ProfileShape::Circle => 0,
            ProfileShape::Square => 1,
            ProfileShape::Triangle => 2,
            ProfileShape::HalfCircle => 5,
        }
    }
}

impl fmt::Display for ProfileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileShape::Circle => "circle",
            ProfileShape::Square => "square",
            ProfileShape::Triangle => "triangle",
            ProfileShape::HalfCircle => "half-circle",
        };
        f.write_str(name)
    }
}

/// Shape of the inner cut-out of a hollow profile
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleShape {
    /// Same family as the outer profile
    #[default]
    Same,
    Circle,
    Square,
    Triangle,
}

impl HoleShape {
    /// Decode the high nibble of a packed profile-curve byte.
    ///
    /// Unknown codes fall back to [`HoleShape::Same`].
    pub fn from_code(code: u8) -> Self {
        match code & 0xf0 {
            0x10 => HoleShape::Circle,
            0x20 => HoleShape::Square,
            0x30 => HoleShape::Triangle,
            _ => HoleShape::Same,
        }
    }

    /// Wire code for this hole shape (already shifted into the high nibble)
    pub fn code(self) -> u8 {
        match self {
            HoleShape::Same => 0x00,
            HoleShape::Circle => 0x10,
            HoleShape::Square => 0x20,
            HoleShape::Triangle => 0x30,
        }
    }
}

/// Profile half of a primitive's shape
///
/// `profile_begin` and `profile_end` are fractions of the full outline in
/// `[0, 1]`; `profile_hollow` is the inner cut-out scale in `[0, 0.95]`.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub profile_shape: ProfileShape,
    pub hole_shape: HoleShape,
    pub profile_begin: f32,
    pub profile_end: f32,
    pub profile_hollow: f32,
}

impl ShapeDescriptor {
    /// Create an uncut, solid shape
    pub fn new(profile_shape: ProfileShape, hole_shape: HoleShape) -> Self {
        Self {
            profile_shape,
            hole_shape,
            profile_begin: 0.0,
            profile_end: 1.0,
            profile_hollow: 0.0,
        }
    }

    /// Set the profile cut
    pub fn with_cut(mut self, begin: f32, end: f32) -> Self {
        self.profile_begin = begin;
        self.profile_end = end;
        self
    }

    /// Set the hollow fraction
    pub fn with_hollow(mut self, hollow: f32) -> Self {
        self.profile_hollow = hollow;
        self
    }

    /// Whether the shape has an inner cut-out
    #[inline]
    pub fn is_hollow(&self) -> bool {
        self.profile_hollow > 0.0
    }

    /// Fraction of the outline between begin and end
    #[inline]
    pub fn cut_span(&self) -> f32 {
        self.profile_end - self.profile_begin
    }

    /// Check the cut leaves at least [`MIN_CUT_SPAN`] of outline.
    ///
    /// NaN cuts are rejected too.
    pub fn validate(&self) -> Result<()> {
        if self.profile_begin < self.profile_end - MIN_CUT_SPAN {
            Ok(())
        } else {
            Err(ShapeError::invalid_cut(self.profile_begin, self.profile_end))
        }
    }
}

impl Default for ShapeDescriptor {
    fn default() -> Self {
        Self::new(ProfileShape::Square, HoleShape::Same)
    }
}

/// Parameters supplied alongside the shape by the extrusion stage
///
/// Circle side counts (from `detail` or `sculpt_sides`) are clamped to
/// `[MIN_CIRCLE_SIDES, MAX_OUTLINE_SIDES]` and `split_count` to
/// [`MAX_SPLIT_COUNT`] during generation.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// The extrusion path is open, so the profile needs end caps
    pub path_is_open: bool,
    /// Level-of-detail factor for circle tessellation
    pub detail: f32,
    /// Extra interpolated points per polygon edge
    pub split_count: u32,
    pub is_sculpted: bool,
    /// Circle side count used instead of the detail when sculpted
    pub sculpt_sides: u32,
}

impl GenerationParameters {
    /// Parameters for one of the four viewer levels of detail.
    ///
    /// Levels past the highest clamp to it.
    pub fn for_lod(lod: usize) -> Self {
        let level = lod.min(DETAIL_SCALES.len() - 1);
        Self {
            detail: DETAIL_SCALES[level],
            ..Self::default()
        }
    }

    pub fn with_open_path(mut self, path_is_open: bool) -> Self {
        self.path_is_open = path_is_open;
        self
    }

    pub fn with_detail(mut self, detail: f32) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_split(mut self, split_count: u32) -> Self {
        self.split_count = split_count;
        self
    }

    /// Mark the primitive as sculpt-derived with a fixed circle side count
    pub fn with_sculpt_sides(mut self, sides: u32) -> Self {
        self.is_sculpted = true;
        self.sculpt_sides = sides;
        self
    }
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            path_is_open: false,
            detail: 1.0,
            split_count: 0,
            is_sculpted: false,
            sculpt_sides: 0,
        }
    }
}
