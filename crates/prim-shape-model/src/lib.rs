// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Prim Shape Model - Shared types for primitive profile generation
//!
//! This crate holds the inputs of the profile generator: the shape family,
//! hole shape, cut and hollow of a primitive's cross-section, and the
//! generation parameters supplied by the extrusion stage.
//!
//! # Overview
//!
//! - [`ShapeDescriptor`] - Profile shape, hole shape, cut and hollow
//! - [`GenerationParameters`] - Path openness, detail, edge split, sculpt override
//! - [`PackedShape`] - The fixed-point form the fields travel in on the wire
//! - [`ShapeSource`] - Implemented by shape owners
//!
//! # Example
//!
//! ```ignore
//! use prim_shape_model::{HoleShape, PackedShape, ProfileShape, ShapeDescriptor};
//!
//! let tube = ShapeDescriptor::new(ProfileShape::Circle, HoleShape::Same).with_hollow(0.5);
//! let packed = PackedShape::encode(&tube);
//! assert_eq!(packed.decode()?.profile_shape, ProfileShape::Circle);
//! ```

pub mod error;
pub mod traits;
pub mod types;
pub mod wire;

// Re-export all public types
pub use error::*;
pub use traits::*;
pub use types::*;
pub use wire::*;
