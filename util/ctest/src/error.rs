// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Error types for the harness itself.
//!
//! Assertion failures are not errors: they are absorbed by the test that
//! raised them. The variants below describe a harness that cannot produce a
//! meaningful report at all, and every one of them ends the process.

/// Fatal harness errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtestError {
    /// The registry handed to the runner holds no tests
    EmptyRegistry,
    /// An environment setting holds a value the harness does not understand
    InvalidSetting {
        key: &'static str,
        value: String,
    },
}

impl core::fmt::Display for CtestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CtestError::EmptyRegistry => write!(f, "No tests are defined!"),
            CtestError::InvalidSetting { key, value } => {
                write!(f, "Invalid value '{value}' for {key}!")
            }
        }
    }
}

impl std::error::Error for CtestError {}

/// Convenience type alias for Result with CtestError
pub type Result<T> = core::result::Result<T, CtestError>;
