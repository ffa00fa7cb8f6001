//! Animal entity - The central record of the rescue.
//!
//! Every other case record (trips, vet visits, adoptions, money) hangs off an
//! animal. `group_name` links an animal to a puppy group by value only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sex of an animal as stored in the `sex` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Sex {
    /// Male
    #[sea_orm(string_value = "M")]
    M,
    /// Female
    #[sea_orm(string_value = "F")]
    F,
    /// Not determined
    #[sea_orm(string_value = "Unknown")]
    Unknown,
}

impl Sex {
    /// Accepted spellings, matched exactly.
    pub const ALLOWED: [&'static str; 3] = ["M", "F", "Unknown"];

    /// Parses the exact stored spelling.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "M" => Some(Self::M),
            "F" => Some(Self::F),
            "Unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Status values the rest of the application recognises.
///
/// The `status` column itself is free text; unrecognised values are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimalStatus {
    /// Rescue arranged, not yet moving
    Planned,
    /// On the road
    InTransport,
    /// With a foster or at the shelter
    InCare,
    /// Waiting on a vet outcome
    VetPending,
    /// Cleared for adoption
    Ready,
    /// Placed with an adopter
    Adopted,
    /// Handed to another organisation
    Transferred,
    /// Died in care
    Deceased,
}

impl AnimalStatus {
    /// Every recognised status.
    pub const ALL: [Self; 8] = [
        Self::Planned,
        Self::InTransport,
        Self::InCare,
        Self::VetPending,
        Self::Ready,
        Self::Adopted,
        Self::Transferred,
        Self::Deceased,
    ];

    /// Canonical spelling written to the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InTransport => "In Transport",
            Self::InCare => "In Care",
            Self::VetPending => "Vet Pending",
            Self::Ready => "Ready",
            Self::Adopted => "Adopted",
            Self::Transferred => "Transferred",
            Self::Deceased => "Deceased",
        }
    }

    /// Case-insensitive lookup; `None` for anything outside the vocabulary.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
    }
}

/// Animal database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "animals")]
pub struct Model {
    /// Unique identifier for the animal
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name given by the rescue (required, max 100 characters)
    pub name: String,
    /// Temporary name used before intake paperwork is done
    pub temp_name: Option<String>,
    /// Breed or best guess
    pub breed: Option<String>,
    /// `M`, `F` or `Unknown`
    pub sex: Option<Sex>,
    /// Coat colour
    pub colour: Option<String>,
    /// Collar colour used to tell littermates apart
    pub collar_colour: Option<String>,
    /// Weight in kilograms
    pub weight: Option<Decimal>,
    /// Known or estimated date of birth
    pub date_of_birth: Option<DateTime>,
    /// When the animal entered the rescue
    #[sea_orm(indexed)]
    pub intake_date: DateTime,
    /// Free-form status, see [`AnimalStatus`] for the recognised values
    #[sea_orm(indexed)]
    pub status: Option<String>,
    /// Where the animal was found or surrendered
    pub origin_location: Option<String>,
    /// Country of origin
    pub origin_country: Option<String>,
    /// Free-text notes about the animal's origin
    pub origin_notes: Option<String>,
    /// Microchip number, if chipped
    pub microchip_id: Option<String>,
    /// Name of the puppy group this animal belongs to (unenforced link)
    pub group_name: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Path to the profile photo
    pub photo_path: Option<String>,
    /// When the row was created
    pub created_at: DateTime,
    /// When the row was last changed
    pub updated_at: DateTime,
    /// Soft delete flag - if true, the animal is hidden but data is preserved
    pub is_deleted: bool,
}

impl Model {
    /// The recognised status, if the stored text matches one.
    #[must_use]
    pub fn recognised_status(&self) -> Option<AnimalStatus> {
        self.status.as_deref().and_then(AnimalStatus::parse)
    }
}

/// Defines relationships between Animal and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One animal appears on many trips
    #[sea_orm(has_many = "super::trip_animal::Entity")]
    TripAnimals,
    /// One animal has many vet visits
    #[sea_orm(has_many = "super::vet_visit::Entity")]
    VetVisits,
    /// One animal has many adoption records
    #[sea_orm(has_many = "super::adoption::Entity")]
    Adoptions,
    /// One animal has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One animal has many income records
    #[sea_orm(has_many = "super::income::Entity")]
    Incomes,
    /// One animal has many attached files
    #[sea_orm(has_many = "super::file_attachment::Entity")]
    FileAttachments,
}

impl Related<super::trip_animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripAnimals.def()
    }
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        super::trip_animal::Relation::Trip.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::trip_animal::Relation::Animal.def().rev())
    }
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

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::income::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incomes.def()
    }
}

impl Related<super::file_attachment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FileAttachments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
