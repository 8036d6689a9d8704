// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Profile memoization and batch generation
//!
//! Scenes hold many primitives with identical shapes (unit boxes above all),
//! so generated curves are shared by value key. Batches of distinct shapes
//! are generated in parallel.

use crate::error::Result;
use crate::options::GeneratorOptions;
use crate::profile::{generate_with_options, ProfileCurve};
use prim_shape_model::{GenerationParameters, ShapeDescriptor, ShapeSource};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::sync::Arc;

/// Exact bit pattern of every generator input
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct ProfileKey {
    curve: u8,
    begin: u32,
    end: u32,
    hollow: u32,
    path_is_open: bool,
    detail: u32,
    split_count: u32,
    sculpt_sides: Option<u32>,
}

impl ProfileKey {
    fn new(shape: &ShapeDescriptor, params: &GenerationParameters) -> Self {
        Self {
            curve: shape.profile_shape.code() | shape.hole_shape.code(),
            begin: shape.profile_begin.to_bits(),
            end: shape.profile_end.to_bits(),
            hollow: shape.profile_hollow.to_bits(),
            path_is_open: params.path_is_open,
            detail: params.detail.to_bits(),
            split_count: params.split_count,
            sculpt_sides: params.is_sculpted.then_some(params.sculpt_sides),
        }
    }
}

/// Cache of generated profiles keyed by their full input
///
/// Single-threaded like the other geometry caches; give each worker its
/// own cache or use [`generate_batch`] for parallel work.
pub struct ProfileCache {
    options: GeneratorOptions,
    curves: RefCell<FxHashMap<ProfileKey, Arc<ProfileCurve>>>,
}

impl ProfileCache {
    /// Create an empty cache using default options
    pub fn new() -> Self {
        Self::with_options(GeneratorOptions::default())
    }

    /// Create an empty cache generating with `options`
    pub fn with_options(options: GeneratorOptions) -> Self {
        Self {
            options,
            curves: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Get the cached curve for these inputs, generating it on a miss.
    ///
    /// Failures are returned and not cached.
    pub fn get_or_generate(
        &self,
        shape: &ShapeDescriptor,
        params: &GenerationParameters,
    ) -> Result<Arc<ProfileCurve>> {
        let key = ProfileKey::new(shape, params);
        if let Some(curve) = self.curves.borrow().get(&key) {
            log::trace!("profile cache hit for {}", shape.profile_shape);
            return Ok(Arc::clone(curve));
        }

        let curve = Arc::new(generate_with_options(shape, params, &self.options)?);
        self.curves.borrow_mut().insert(key, Arc::clone(&curve));
        Ok(curve)
    }

    /// Get the curve for a shape owner's current inputs
    pub fn get_for(&self, source: &dyn ShapeSource) -> Result<Arc<ProfileCurve>> {
        self.get_or_generate(&source.shape(), &source.generation_parameters())
    }

    /// Number of cached curves
    pub fn len(&self) -> usize {
        self.curves.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.borrow().is_empty()
    }

    /// Drop every cached curve
    pub fn clear(&self) {
        self.curves.borrow_mut().clear();
    }
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate many profiles in parallel, one result per input, in input order
pub fn generate_batch(inputs: &[(ShapeDescriptor, GenerationParameters)]) -> Vec<Result<ProfileCurve>> {
    generate_batch_with_options(inputs, &GeneratorOptions::default())
}

/// [`generate_batch`] with explicit options
pub fn generate_batch_with_options(
    inputs: &[(ShapeDescriptor, GenerationParameters)],
    options: &GeneratorOptions,
) -> Vec<Result<ProfileCurve>> {
    inputs
        .par_iter()
        .map(|(shape, params)| generate_with_options(shape, params, options))
        .collect()
}
