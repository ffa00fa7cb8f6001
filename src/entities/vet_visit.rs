//! Vet visit entity - One appointment for one animal.
//!
//! Common procedures are tracked as date/cost pairs directly on the visit;
//! anything else is itemised as a `vet_service` row.

use super::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vet visit database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vet_visits")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Animal that was seen
    pub animal_id: i64,
    /// Vet who saw the animal; cleared if that person is deleted
    pub person_id: Option<i64>,
    /// When the visit took place
    pub visit_date: DateTime,
    /// Total cost
    #[sea_orm(column_type = "Text")]
    pub total_cost: Money,
    /// Free-text notes
    pub notes: Option<String>,
    /// Path to the vet invoice
    pub invoice_path: Option<String>,
    /// Vet signed the animal off for adoption at this visit
    pub ready_for_adoption: bool,
    /// When worming was done
    pub worming_date: Option<DateTime>,
    /// Cost of worming
    #[sea_orm(column_type = "Text")]
    pub worming_cost: Option<Money>,
    /// When deflea treatment was done
    pub deflea_date: Option<DateTime>,
    /// Cost of deflea treatment
    #[sea_orm(column_type = "Text")]
    pub deflea_cost: Option<Money>,
    /// When dental work was done
    pub dental_date: Option<DateTime>,
    /// Cost of dental work
    #[sea_orm(column_type = "Text")]
    pub dental_cost: Option<Money>,
    /// When the animal was spayed or neutered
    pub spay_neuter_date: Option<DateTime>,
    /// Cost of the spay or neuter
    #[sea_orm(column_type = "Text")]
    pub spay_neuter_cost: Option<Money>,
    /// First vaccine name
    pub vaccine1_name: Option<String>,
    /// First vaccine date
    pub vaccine1_date: Option<DateTime>,
    /// First vaccine cost
    #[sea_orm(column_type = "Text")]
    pub vaccine1_cost: Option<Money>,
    /// Second vaccine name
    pub vaccine2_name: Option<String>,
    /// Second vaccine date
    pub vaccine2_date: Option<DateTime>,
    /// Second vaccine cost
    #[sea_orm(column_type = "Text")]
    pub vaccine2_cost: Option<Money>,
    /// Third vaccine name
    pub vaccine3_name: Option<String>,
    /// Third vaccine date
    pub vaccine3_date: Option<DateTime>,
    /// Third vaccine cost
    #[sea_orm(column_type = "Text")]
    pub vaccine3_cost: Option<Money>,
    /// Free-text vaccination summary
    pub vaccinations: Option<String>,
    /// Soft delete flag
    pub is_deleted: bool,
}

/// Defines relationships between `VetVisit` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Visit is removed with its animal
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Animal,
    /// Visit survives its vet
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Vet,
    /// Itemised services
    #[sea_orm(has_many = "super::vet_service::Entity")]
    Services,
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vet.def()
    }
}

impl Related<super::vet_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Services.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
