//! License entity - Stored activation record.
//!
//! Kept for schema completeness; nothing in this crate verifies keys.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// License database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "licenses")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name the license is issued to
    pub licensee_name: String,
    /// License key
    pub license_key: String,
    /// Signature over the key
    pub signature: String,
    /// Machine the license is bound to
    pub machine_id: String,
    /// When the license was activated
    pub activation_date: Option<DateTime>,
    /// Whether this license is in use
    pub is_active: bool,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime,
}

/// `License` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
