//! Vet service entity - An itemised line on a vet visit.

use super::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vet service database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vet_services")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The vet visit this service was itemised on
    pub visit_id: i64,
    /// Name of the service
    pub service_name: Option<String>,
    /// Cost
    #[sea_orm(column_type = "Text")]
    pub cost: Option<Money>,
}

/// Services are removed with their visit
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each service belongs to one vet visit
    #[sea_orm(
        belongs_to = "super::vet_visit::Entity",
        from = "Column::VisitId",
        to = "super::vet_visit::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    VetVisit,
}

impl Related<super::vet_visit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VetVisit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
