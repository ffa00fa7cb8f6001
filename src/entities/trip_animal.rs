//! Join rows between trips and animals.
//!
//! A row is identified only by `(trip_id, animal_id)` and disappears as soon
//! as either side is hard-deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Trip/animal link
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trip_animals")]
pub struct Model {
    /// The trip (part of the key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub trip_id: i64,
    /// The animal (part of the key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub animal_id: i64,
}

/// Both ends cascade
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each row belongs to one trip
    #[sea_orm(
        belongs_to = "super::trip::Entity",
        from = "Column::TripId",
        to = "super::trip::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Trip,
    /// Each row belongs to one animal
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
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
