// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face descriptors and their semantic tags

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Semantic role of a profile face, as a bit set
///
/// Renderers texture each tagged face independently, so the bit values are
/// part of the content format and must not change.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaceTag(u32);

impl FaceTag {
    pub const NONE: FaceTag = FaceTag(0);
    pub const PATH_BEGIN: FaceTag = FaceTag(1 << 0);
    pub const PATH_END: FaceTag = FaceTag(1 << 1);
    pub const INNER_SIDE: FaceTag = FaceTag(1 << 2);
    pub const PROFILE_BEGIN: FaceTag = FaceTag(1 << 3);
    pub const PROFILE_END: FaceTag = FaceTag(1 << 4);
    pub const OUTER_SIDE_0: FaceTag = FaceTag(1 << 5);
    pub const OUTER_SIDE_1: FaceTag = FaceTag(1 << 6);
    pub const OUTER_SIDE_2: FaceTag = FaceTag(1 << 7);
    pub const OUTER_SIDE_3: FaceTag = FaceTag(1 << 8);

    /// Tag of the `index`-th outer side (`OUTER_SIDE_0 << index`).
    ///
    /// Indices past 26 shift out of the field and yield an empty tag.
    #[inline]
    pub const fn outer_side(index: u32) -> FaceTag {
        match Self::OUTER_SIDE_0.0.checked_shl(index) {
            Some(bits) => FaceTag(bits),
            None => FaceTag(0),
        }
    }

    /// Build a tag from raw bits
    #[inline]
    pub const fn from_bits(bits: u32) -> FaceTag {
        FaceTag(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit of `other` is set
    #[inline]
    pub const fn contains(self, other: FaceTag) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FaceTag {
    type Output = FaceTag;

    fn bitor(self, rhs: FaceTag) -> FaceTag {
        FaceTag(self.0 | rhs.0)
    }
}

impl BitOrAssign for FaceTag {
    fn bitor_assign(&mut self, rhs: FaceTag) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for FaceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(FaceTag, &str); 5] = [
            (FaceTag::PATH_BEGIN, "PATH_BEGIN"),
            (FaceTag::PATH_END, "PATH_END"),
            (FaceTag::INNER_SIDE, "INNER_SIDE"),
            (FaceTag::PROFILE_BEGIN, "PROFILE_BEGIN"),
            (FaceTag::PROFILE_END, "PROFILE_END"),
        ];

        let mut names: Vec<String> = NAMES
            .iter()
            .filter(|(tag, _)| self.contains(*tag))
            .map(|(_, name)| (*name).to_string())
            .collect();
        for side in 0..27 {
            if self.contains(FaceTag::outer_side(side)) {
                names.push(format!("OUTER_SIDE_{}", side));
            }
        }

        if names.is_empty() {
            write!(f, "FaceTag(NONE)")
        } else {
            write!(f, "FaceTag({})", names.join(" | "))
        }
    }
}

/// One face of a profile: a run of consecutive profile points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceDescriptor {
    /// Index of the first point of the face
    pub start_index: usize,
    /// Number of points covered
    pub vertex_count: usize,
    /// Texture U scale along the face
    pub u_scale: f32,
    /// Filled polygon closing an open path end
    pub is_cap: bool,
    /// Shaded flat rather than smooth
    pub is_flat: bool,
    pub tag: FaceTag,
}

impl FaceDescriptor {
    /// A side face over `[start_index, start_index + vertex_count)`
    pub fn side(start_index: usize, vertex_count: usize, u_scale: f32, tag: FaceTag, flat: bool) -> Self {
        Self {
            start_index,
            vertex_count,
            u_scale,
            is_cap: false,
            is_flat: flat,
            tag,
        }
    }

    /// A cap covering the first `vertex_count` points
    pub fn cap(vertex_count: usize, tag: FaceTag) -> Self {
        Self {
            start_index: 0,
            vertex_count,
            u_scale: 1.0,
            is_cap: true,
            is_flat: false,
            tag,
        }
    }
}
