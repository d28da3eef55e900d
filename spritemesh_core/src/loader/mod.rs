// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: project persistence

pub mod project;
