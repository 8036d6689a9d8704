// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for shape descriptors

use thiserror::Error;

/// Result type alias for shape operations
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Errors raised while building or decoding a shape descriptor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Profile-curve code outside the known shape families
    #[error("Unknown profile shape code: {0:#04x}")]
    UnknownProfileShape(u8),

    /// Profile cut leaves less than the minimum span
    #[error("Profile cut too narrow: begin {begin} must be below end {end} - 0.01")]
    InvalidCut { begin: f32, end: f32 },
}

impl ShapeError {
    /// Create an invalid cut error
    pub fn invalid_cut(begin: f32, end: f32) -> Self {
        ShapeError::InvalidCut { begin, end }
    }
}
