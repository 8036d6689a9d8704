// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for profile generation

use prim_shape_model::ShapeError;
use thiserror::Error;

/// Profile generation result type
pub type Result<T> = std::result::Result<T, Error>;

/// Profile generation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The shape cannot be generated; the caller keeps its previous profile
    #[error("Invalid shape descriptor: {0}")]
    InvalidShapeDescriptor(String),
}

impl Error {
    /// Create an invalid shape descriptor error
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Error::InvalidShapeDescriptor(msg.into())
    }
}

impl From<ShapeError> for Error {
    fn from(err: ShapeError) -> Self {
        Error::invalid_shape(err.to_string())
    }
}
