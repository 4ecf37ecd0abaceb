//! sea-orm entities for the Cause Quest backend.

pub mod activities;
pub mod participations;
pub mod point_awards;
pub mod reviews;
pub mod users;
