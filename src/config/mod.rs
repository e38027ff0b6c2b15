// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module for svcform
//!
//! Handles loading the session defaults context.

pub mod session;

pub use session::*;
