// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Prim Profile - Primitive Profile Curve Generation
//!
//! Computes the 2D cross-section ("profile") of a procedural primitive before
//! the extrusion stage sweeps it along a path. Vertex order, vertex counts and
//! face tags match the legacy tessellation that deployed content, viewers and
//! physics engines rely on.
//!
//! ## Overview
//!
//! - **Arc Tessellation**: Cut n-gon and circle outlines with edge subdivision
//! - **Hollow Rings**: Inner boundaries scaled by the hollow fraction, wound in reverse
//! - **Face Recording**: Caps, outer sides, inner side and cut faces with bit tags
//! - **Caching**: Memoized curves for primitives sharing a shape, parallel batches
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use prim_profile::{generate, FaceTag, GenerationParameters, HoleShape, ProfileShape, ShapeDescriptor};
//!
//! let tube = ShapeDescriptor::new(ProfileShape::Circle, HoleShape::Same).with_hollow(0.5);
//! let curve = generate(&tube, &GenerationParameters::for_lod(2))?;
//!
//! let inner = curve.face(FaceTag::INNER_SIDE).unwrap();
//! println!("{} points, inner ring at {}", curve.len(), inner.start_index);
//! ```

pub mod cache;
pub mod error;
pub mod face;
pub mod options;
pub mod profile;
pub mod tessellate;

// Re-export nalgebra types for convenience
pub use nalgebra::Point2;

// Re-export shape inputs
pub use prim_shape_model::{
    GenerationParameters, HoleShape, PackedShape, ProfileShape, ShapeDescriptor, ShapeSource,
};

// Re-export main types
pub use cache::{generate_batch, generate_batch_with_options, ProfileCache};
pub use error::{Error, Result};
pub use face::{FaceDescriptor, FaceTag};
pub use options::{GeneratorOptions, OuterSideTags};
pub use profile::{generate, generate_packed, generate_with_options, ProfileCurve};
pub use tessellate::{radius_scale, tessellate_arc, ArcClosure, ArcSpec, ArcTessellation};
