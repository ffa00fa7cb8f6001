//! Person entity - Adopters, vets, contacts and volunteers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role a person plays for the rescue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PersonType {
    /// Adopts animals
    #[sea_orm(string_value = "Adopter")]
    Adopter,
    /// Veterinarian
    #[sea_orm(string_value = "Vet")]
    Vet,
    /// General contact
    #[sea_orm(string_value = "Contact")]
    Contact,
    /// Volunteer
    #[sea_orm(string_value = "Volunteer")]
    Volunteer,
}

impl PersonType {
    /// Accepted spellings, matched exactly.
    pub const ALLOWED: [&'static str; 4] = ["Adopter", "Vet", "Contact", "Volunteer"];

    /// Parses the exact stored spelling.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Adopter" => Some(Self::Adopter),
            "Vet" => Some(Self::Vet),
            "Contact" => Some(Self::Contact),
            "Volunteer" => Some(Self::Volunteer),
            _ => None,
        }
    }
}

/// Person database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "people")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Full name (required, max 150 characters)
    pub name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Role of the person
    pub person_type: PersonType,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime,
    /// Soft delete flag
    pub is_deleted: bool,
}

/// Defines relationships between Person and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Visits where this person was the vet
    #[sea_orm(has_many = "super::vet_visit::Entity")]
    VetVisits,
    /// Adoptions where this person is the adopter
    #[sea_orm(has_many = "super::adoption::Entity")]
    Adoptions,
    /// Income received from this person
    #[sea_orm(has_many = "super::income::Entity")]
    Incomes,
}

impl Related<super::vet_visit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VetVisits.def()
    }
}

impl Related<super::adoption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adoptions.def()
    }
}

impl Related<super::income::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incomes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
