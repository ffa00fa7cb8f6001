//! Puppy group business logic.
//!
//! Membership is by `group_name` value only. Renaming or deleting a group
//! does not touch the animals or incomes that mention it.

use crate::{
    core::{animal, income, now, validation::ValidationErrors},
    entities::{PuppyGroup, animal as animal_entity, income as income_entity, puppy_group},
    errors::Result,
};
use chrono::NaiveDateTime;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Input for [`create_puppy_group`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPuppyGroup {
    /// Name animals and incomes refer to (required)
    pub group_name: String,
    /// When the group was formed
    pub date_created: Option<NaiveDateTime>,
    /// Path to a group photo
    pub image_path: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

/// Validates and inserts a puppy group.
///
/// # Errors
/// Returns a validation error if the name is blank, or a database error.
pub async fn create_puppy_group<C: ConnectionTrait>(
    db: &C,
    input: NewPuppyGroup,
) -> Result<puppy_group::Model> {
    let mut errors = ValidationErrors::new();
    errors.require("group_name", Some(input.group_name.as_str()));
    errors.into_result()?;

    let now = now();
    let group = puppy_group::ActiveModel {
        group_name: Set(input.group_name.trim().to_string()),
        date_created: Set(input.date_created),
        image_path: Set(input.image_path),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(group.insert(db).await?)
}

/// Finds the first group with exactly this name.
pub async fn get_puppy_group_by_name<C: ConnectionTrait>(
    db: &C,
    group_name: &str,
) -> Result<Option<puppy_group::Model>> {
    PuppyGroup::find()
        .filter(puppy_group::Column::GroupName.eq(group_name))
        .order_by_asc(puppy_group::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Active animals whose `group_name` matches the group's name.
pub async fn get_members<C: ConnectionTrait>(
    db: &C,
    group: &puppy_group::Model,
) -> Result<Vec<animal_entity::Model>> {
    animal::get_animals_in_group(db, &group.group_name).await
}

/// Active incomes tagged with the group's name.
pub async fn get_group_incomes<C: ConnectionTrait>(
    db: &C,
    group: &puppy_group::Model,
) -> Result<Vec<income_entity::Model>> {
    income::get_incomes_for_group(db, &group.group_name).await
}
