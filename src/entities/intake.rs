//! Intake entity - A bulk arrival, usually a litter.
//!
//! `total_cost` is whatever the caller recorded; the store does not
//! recompute it from `puppy_count` and `cost_per_puppy`.

use super::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Intake database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "intakes")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When it happened
    pub date: DateTime,
    /// Number of puppies in the intake
    pub puppy_count: i32,
    /// Where the intake happened
    pub location: Option<String>,
    /// Cost for the whole litter
    #[sea_orm(column_type = "Text")]
    pub cost_per_litter: Option<Money>,
    /// Cost per puppy
    #[sea_orm(column_type = "Text")]
    pub cost_per_puppy: Option<Money>,
    /// Total cost
    #[sea_orm(column_type = "Text")]
    pub total_cost: Option<Money>,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime,
    /// When the row was last changed
    pub updated_at: DateTime,
}

/// `Intake` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
