// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI module for svcform
//!
//! Handles command-line argument parsing.

pub mod args;

pub use args::*;
