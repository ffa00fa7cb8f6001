//! Puppy group entity - Siblings or a litter that came in together.
//!
//! Animals and incomes refer to a group by its `group_name` text; there is no
//! foreign key and the store never checks that the name exists here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Puppy group database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "puppy_groups")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name animals and incomes refer to
    pub group_name: String,
    /// When the group was formed
    pub date_created: Option<DateTime>,
    /// Path to a group photo
    pub image_path: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime,
    /// When the row was last changed
    pub updated_at: DateTime,
}

/// `PuppyGroup` has no enforced relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
