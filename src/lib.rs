// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! svcform - tiered defaults resolution for service edit forms.
//!
//! A service (and its notifiers, webhooks, commands and version lookups) is edited
//! through a form whose effective values come from three tiers: the explicit
//! value, the per-entity default and the global hard default.
//!
//! Architecture highlights:
//! - `engine`: value-level resolver, hollowing, defaults-equivalence and pruning
//! - `model`: typed form records, one per entity kind
//! - `config`: the immutable session defaults context and its loading
//! - `schema`: per-kind builders producing validator, initial and default values
//! - `wire`: outgoing payload minimization
//! - `form`: per-field `using_defaults` view for the form layer
//! - `cli`, `commands`: the `svcform` binary surface

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod form;
pub mod model;
pub mod schema;
pub mod wire;

pub use config::SessionDefaults;
pub use engine::{hollow, is_using_defaults, prune, resolve, IdentitySpec};
pub use error::{FormError, Result};
pub use model::{Record, ServiceEdit};
