// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generator options
//!
//! Knobs for the two places where the legacy generator's behavior depends on
//! a compatibility decision rather than on the shape itself.

use crate::face::FaceTag;
use serde::{Deserialize, Serialize};

/// Default full span of a half-circle cut (50000 wire units)
pub const HALF_CIRCLE_FULL_SPAN: f32 = 1.0;

/// How outer-side faces beyond the fourth are tagged
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OuterSideTags {
    /// Shift into the full tag field
    #[default]
    Widened,
    /// Wrap the side index into the four declared outer-side bits
    LegacyWrap,
}

/// Options applied on top of the shape and generation parameters
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub outer_side_tags: OuterSideTags,
    /// Half-circle cuts spanning less than this stay open; full spans are
    /// closed by repeating the first point
    pub half_circle_full_span: f32,
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outer_side_tags(mut self, tags: OuterSideTags) -> Self {
        self.outer_side_tags = tags;
        self
    }

    pub fn with_half_circle_full_span(mut self, span: f32) -> Self {
        self.half_circle_full_span = span;
        self
    }

    /// Tag for the outer side at `index`
    pub fn outer_side_tag(&self, index: u32) -> FaceTag {
        match self.outer_side_tags {
            OuterSideTags::Widened => FaceTag::outer_side(index),
            OuterSideTags::LegacyWrap => FaceTag::outer_side(index % 4),
        }
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            outer_side_tags: OuterSideTags::Widened,
            half_circle_full_span: HALF_CIRCLE_FULL_SPAN,
        }
    }
}
