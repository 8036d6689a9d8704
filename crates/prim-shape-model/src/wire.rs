// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-point wire form of the profile fields
//!
//! The object-update messages carry the profile as one packed curve byte
//! (shape in the low nibble, hole in the high nibble) and three 16-bit
//! counts of [`CUT_QUANTUM`].

use crate::{HoleShape, ProfileShape, Result, ShapeDescriptor, MAX_HOLLOW};
use serde::{Deserialize, Serialize};

/// Size of one wire unit for begin, end and hollow
pub const CUT_QUANTUM: f32 = 0.00002;

/// Wire units spanning the whole outline
pub const FULL_CUT_UNITS: u16 = 50000;

/// Profile fields as they appear on the wire
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct PackedShape {
    pub profile_curve: u8,
    pub profile_begin: u16,
    /// Counted back from [`FULL_CUT_UNITS`], so zero is an uncut end
    pub profile_end: u16,
    pub profile_hollow: u16,
}

impl PackedShape {
    /// Decode into a shape descriptor.
    ///
    /// Fails only on an unknown profile shape; hollow is clamped and unknown
    /// hole codes fall back to [`HoleShape::Same`].
    pub fn decode(&self) -> Result<ShapeDescriptor> {
        let profile_shape = ProfileShape::from_code(self.profile_curve)?;
        let hole_shape = HoleShape::from_code(self.profile_curve);

        let begin = self.profile_begin as f32 * CUT_QUANTUM;
        let end = (FULL_CUT_UNITS as f32 - self.profile_end as f32) * CUT_QUANTUM;
        let hollow = (self.profile_hollow as f32 * CUT_QUANTUM).clamp(0.0, MAX_HOLLOW);

        Ok(ShapeDescriptor::new(profile_shape, hole_shape)
            .with_cut(begin, end)
            .with_hollow(hollow))
    }

    /// Quantize a descriptor to the nearest wire units
    pub fn encode(shape: &ShapeDescriptor) -> Self {
        let units = |value: f32| (value / CUT_QUANTUM).round().clamp(0.0, FULL_CUT_UNITS as f32) as u16;

        Self {
            profile_curve: shape.profile_shape.code() | shape.hole_shape.code(),
            profile_begin: units(shape.profile_begin),
            profile_end: FULL_CUT_UNITS - units(shape.profile_end),
            profile_hollow: units(shape.profile_hollow.clamp(0.0, MAX_HOLLOW)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_decode_default_box() {
        let shape = PackedShape {
            profile_curve: 0x01,
            ..Default::default()
        }
        .decode()
        .unwrap();

        assert_eq!(shape.profile_shape, ProfileShape::Square);
        assert_eq!(shape.hole_shape, HoleShape::Same);
        assert_eq!(shape.profile_begin, 0.0);
        assert_abs_diff_eq!(shape.profile_end, 1.0, epsilon = 1e-6);
        assert!(!shape.is_hollow());
    }

    #[test]
    fn test_decode_cut_hollow_tube() {
        let shape = PackedShape {
            profile_curve: 0x10,
            profile_begin: 12500,
            profile_end: 12500,
            profile_hollow: 25000,
        }
        .decode()
        .unwrap();

        assert_eq!(shape.profile_shape, ProfileShape::Circle);
        assert_eq!(shape.hole_shape, HoleShape::Circle);
        assert_abs_diff_eq!(shape.profile_begin, 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(shape.profile_end, 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(shape.profile_hollow, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_decode_clamps_hollow() {
        let shape = PackedShape {
            profile_curve: 0x01,
            profile_hollow: 49000,
            ..Default::default()
        }
        .decode()
        .unwrap();
        assert_eq!(shape.profile_hollow, MAX_HOLLOW);
    }

    #[test]
    fn test_decode_unknown_shape() {
        let packed = PackedShape {
            profile_curve: 0x09,
            ..Default::default()
        };
        assert_eq!(packed.decode(), Err(ShapeError::UnknownProfileShape(9)));
    }

    #[test]
    fn test_encode_half_circle_with_square_hole() {
        let shape = ShapeDescriptor::new(ProfileShape::HalfCircle, HoleShape::Square)
            .with_cut(0.1, 0.9)
            .with_hollow(0.3);
        let packed = PackedShape::encode(&shape);

        assert_eq!(packed.profile_curve, 0x25);
        assert_eq!(packed.profile_begin, 5000);
        assert_eq!(packed.profile_end, 5000);
        assert_eq!(packed.profile_hollow, 15000);
    }
}
