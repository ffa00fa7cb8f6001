//! License storage. Keys and signatures are stored as given and never verified.

use crate::{
    core::{now, validation::ValidationErrors},
    entities::{License, license},
    errors::Result,
};
use chrono::NaiveDateTime;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Maximum length of a licensee name.
pub const MAX_LICENSEE_LEN: usize = 255;
/// Maximum length of a machine id.
pub const MAX_MACHINE_ID_LEN: usize = 32;

/// Input for [`store_license`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLicense {
    /// Name the license is issued to (required)
    pub licensee_name: String,
    /// License key
    pub license_key: String,
    /// Signature over the key
    pub signature: String,
    /// Machine the license is bound to (required)
    pub machine_id: String,
    /// When the license was activated
    pub activation_date: Option<NaiveDateTime>,
    /// Defaults to true
    pub is_active: Option<bool>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl NewLicense {
    /// # Errors
    /// Returns [`crate::errors::Error::Validation`] listing each failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors
            .require("licensee_name", Some(self.licensee_name.as_str()))
            .max_len("licensee_name", Some(self.licensee_name.as_str()), MAX_LICENSEE_LEN)
            .require("license_key", Some(self.license_key.as_str()))
            .require("signature", Some(self.signature.as_str()))
            .require("machine_id", Some(self.machine_id.as_str()))
            .max_len("machine_id", Some(self.machine_id.as_str()), MAX_MACHINE_ID_LEN);
        errors.into_result()
    }
}

/// Validates and stores a license record.
///
/// # Errors
/// Returns a validation error before touching the store, or a database error.
pub async fn store_license<C: ConnectionTrait>(
    db: &C,
    input: NewLicense,
) -> Result<license::Model> {
    input.validate()?;

    let license = license::ActiveModel {
        licensee_name: Set(input.licensee_name),
        license_key: Set(input.license_key),
        signature: Set(input.signature),
        machine_id: Set(input.machine_id),
        activation_date: Set(input.activation_date),
        is_active: Set(input.is_active.unwrap_or(true)),
        notes: Set(input.notes),
        created_at: Set(now()),
        ..Default::default()
    };

    Ok(license.insert(db).await?)
}

/// The most recently stored active license, if any.
pub async fn get_active_license<C: ConnectionTrait>(db: &C) -> Result<Option<license::Model>> {
    License::find()
        .filter(license::Column::IsActive.eq(true))
        .order_by_desc(license::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}
