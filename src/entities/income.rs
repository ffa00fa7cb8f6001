//! Income entity - Donations, adoption fees and other money received.
//!
//! `group_name` ties income to a puppy group by value only.

use super::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When it happened
    pub date: DateTime,
    /// Kind of income (required, max 100 characters)
    pub income_type: String,
    /// Always greater than zero
    #[sea_orm(column_type = "Text")]
    pub amount: Money,
    /// ISO currency code
    pub currency: String,
    /// The donor or payer
    pub person_id: Option<i64>,
    /// The animal
    pub animal_id: Option<i64>,
    /// Puppy group name (unenforced link)
    pub group_name: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Soft delete flag
    pub is_deleted: bool,
}

/// Defines relationships between Income and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Donor or payer, if known
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Person,
    /// Animal the income relates to, if any
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Animal,
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
