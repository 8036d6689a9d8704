// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traits implemented by shape owners

use crate::{GenerationParameters, ShapeDescriptor};

/// Source of a primitive's profile inputs
///
/// Implemented by whatever owns the primitive (typically a scene object),
/// so generators and caches can read the current shape without depending
/// on the scene graph.
///
/// # Example
///
/// ```ignore
/// use prim_shape_model::{ShapeSource, ShapeDescriptor, GenerationParameters};
///
/// fn describe(source: &dyn ShapeSource) {
///     let shape = source.shape();
///     println!("{} cut {}..{}", shape.profile_shape, shape.profile_begin, shape.profile_end);
/// }
/// ```
pub trait ShapeSource: Send + Sync {
    /// Current shape descriptor
    fn shape(&self) -> ShapeDescriptor;

    /// Parameters the extrusion stage will generate with
    fn generation_parameters(&self) -> GenerationParameters;
}

impl ShapeSource for (ShapeDescriptor, GenerationParameters) {
    fn shape(&self) -> ShapeDescriptor {
        self.0
    }

    fn generation_parameters(&self) -> GenerationParameters {
        self.1
    }
}
