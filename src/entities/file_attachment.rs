//! File attachment entity - Paths to documents and photos stored on disk.
//!
//! `(owner_type, owner_id)` points at any record loosely and is never checked.
//! Only `animal_id` is a real foreign key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// File attachment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file_attachments")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Free-text category of the owning record (e.g. `"Animal"`, `"Trip"`)
    pub owner_type: Option<String>,
    /// Identifier of the owning record (not checked)
    pub owner_id: Option<i64>,
    /// Storage path of the file
    pub path: String,
    /// File type, e.g. `pdf`
    pub file_type: Option<String>,
    /// When the file was attached
    pub uploaded_at: DateTime,
    /// The animal
    pub animal_id: Option<i64>,
}

/// Defines relationships between FileAttachment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Enforced animal link, cleared when the animal goes
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Animal,
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
