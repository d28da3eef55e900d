// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: interactive editing

mod session;

pub use session::{EditSession, Gesture, Mode};
