//! Core domain logic - validation, defaults and store operations per entity.
//!
//! Every `create_*` function validates its `New*` input completely before any
//! statement runs, so a rejected input never leaves a partial write behind.

use chrono::{NaiveDateTime, Utc};

pub mod adoption;
pub mod animal;
pub mod attachment;
pub mod expense;
pub mod income;
pub mod intake;
pub mod license;
pub mod lifecycle;
pub mod money_owed;
pub mod person;
pub mod puppy_group;
pub mod trip;
pub mod validation;
pub mod vet;

/// Current instant used for creation timestamps and "now"-defaulted dates.
pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}
