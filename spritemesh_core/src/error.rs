// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: error definitions

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by model construction and project persistence.
///
/// These are one-shot user-facing failures; there is no retry policy. The
/// editing state machine itself never fails, disabled commands are no-ops.
#[derive(Debug, Error)]
pub enum Error {
    /// The backing image could not be read or decoded.
    #[error("cannot read image `{}`: {source}", path.display())]
    ImageDecode {
        /// Path of the offending image
        path: PathBuf,
        /// Decoder failure
        source: image::ImageError,
    },

    /// A file path could not be canonicalized.
    #[error("cannot resolve path `{}`: {source}", path.display())]
    Path {
        /// Path that failed to resolve
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The project file could not be read.
    #[error("cannot read project file `{}`: {source}", path.display())]
    Read {
        /// Path of the project file
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A project file held a malformed coordinate token.
    #[error("malformed coordinate `{token}` in project file")]
    Parse {
        /// The token that failed to parse as a number
        token: String,
    },

    /// The project file could not be written.
    #[error("cannot write project file `{}`: {source}", path.display())]
    Write {
        /// Path of the project file
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },
}
