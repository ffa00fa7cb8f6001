//! Expense entity - Money spent, optionally tied to a trip and/or an animal.
//!
//! Both links are cleared rather than cascaded when their target goes away,
//! so the books keep every expense.

use super::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Currency applied when the caller does not name one.
pub const DEFAULT_CURRENCY: &str = "CAD";

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When it happened
    pub date: DateTime,
    /// Bookkeeping category (required, max 100 characters)
    pub category: String,
    /// Always greater than zero
    #[sea_orm(column_type = "Text")]
    pub amount: Money,
    /// ISO currency code
    pub currency: String,
    /// The trip this was spent on
    pub trip_id: Option<i64>,
    /// The animal
    pub animal_id: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Path to the scanned receipt
    pub receipt_path: Option<String>,
    /// Soft delete flag
    pub is_deleted: bool,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Trip the expense was incurred on, if any
    #[sea_orm(
        belongs_to = "super::trip::Entity",
        from = "Column::TripId",
        to = "super::trip::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Trip,
    /// Animal the expense was for, if any
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Animal,
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
