//! Domain types shared across the Cause Quest backend.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`
//! except for wire-format helpers.

pub mod activity;
pub mod pagination;
pub mod points;
pub mod serde;
