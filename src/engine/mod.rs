// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Value-level defaults engine
//!
//! Every function here is pure and total over `serde_json::Value`: it never
//! mutates its inputs and never fails. Typed wrappers for [`Record`] kinds live
//! next to the untyped algorithms.
//!
//! [`Record`]: crate::model::Record

pub mod equivalence;
pub mod hollow;
pub mod prune;
pub mod resolve;
pub mod value;

pub use equivalence::{
    is_using_defaults, list_using_defaults, records_using_defaults, rows_using_defaults, IdentitySpec,
};
pub use hollow::{hollow, hollow_record, hollow_records};
pub use prune::prune;
pub use resolve::{resolve, resolve_record};
