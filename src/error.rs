// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinError {
    /// Import blob that is not valid JSON or does not match the backup shape.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Contribution amount must not be zero")]
    ZeroContribution,

    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type FinResult<T> = std::result::Result<T, FinError>;
