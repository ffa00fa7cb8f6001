//! File attachment business logic - Records where a document or photo lives.

use crate::{
    core::{now, validation::ValidationErrors},
    entities::{FileAttachment, file_attachment},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Input for [`attach_file`]. Only `path` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAttachment {
    /// Free-text category of the owner, e.g. `"Trip"`
    pub owner_type: Option<String>,
    /// Identifier of the owning record (not checked)
    pub owner_id: Option<i64>,
    /// Storage path (required)
    pub path: String,
    /// File type, e.g. `pdf`
    pub file_type: Option<String>,
    /// Enforced link; cleared if the animal is deleted
    pub animal_id: Option<i64>,
}

/// Records an attachment. The `(owner_type, owner_id)` pair is stored without
/// checking that the owner exists.
///
/// # Errors
/// Returns a validation error for a blank path, or a database error if
/// `animal_id` names a missing animal.
pub async fn attach_file<C: ConnectionTrait>(
    db: &C,
    input: NewAttachment,
) -> Result<file_attachment::Model> {
    let mut errors = ValidationErrors::new();
    errors.require("path", Some(input.path.as_str()));
    if let Some(animal_id) = input.animal_id {
        errors.positive_id("animal_id", animal_id);
    }
    errors.into_result()?;

    let attachment = file_attachment::ActiveModel {
        owner_type: Set(input.owner_type),
        owner_id: Set(input.owner_id),
        path: Set(input.path.trim().to_string()),
        file_type: Set(input.file_type),
        uploaded_at: Set(now()),
        animal_id: Set(input.animal_id),
        ..Default::default()
    };

    Ok(attachment.insert(db).await?)
}

/// Attachments recorded against an `(owner_type, owner_id)` pair.
pub async fn get_attachments_for<C: ConnectionTrait>(
    db: &C,
    owner_type: &str,
    owner_id: i64,
) -> Result<Vec<file_attachment::Model>> {
    FileAttachment::find()
        .filter(file_attachment::Column::OwnerType.eq(owner_type))
        .filter(file_attachment::Column::OwnerId.eq(owner_id))
        .order_by_asc(file_attachment::Column::UploadedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Attachments linked to an animal through the enforced `animal_id`.
pub async fn get_attachments_for_animal<C: ConnectionTrait>(
    db: &C,
    animal_id: i64,
) -> Result<Vec<file_attachment::Model>> {
    FileAttachment::find()
        .filter(file_attachment::Column::AnimalId.eq(animal_id))
        .order_by_asc(file_attachment::Column::UploadedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_loose_owner_is_not_checked() -> Result<()> {
        let db = setup_test_db().await?;
        let attachment = attach_file(
            &db,
            NewAttachment {
                owner_type: Some("Trip".to_string()),
                owner_id: Some(999),
                path: "receipts/ferry.pdf".to_string(),
                file_type: Some("pdf".to_string()),
                ..Default::default()
            },
        )
        .await?;

        let found = get_attachments_for(&db, "Trip", 999).await?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, attachment.id);
        assert!(get_attachments_for(&db, "Animal", 999).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_animal_link_is_enforced() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        attach_file(
            &db,
            NewAttachment {
                path: "photos/intake.jpg".to_string(),
                animal_id: Some(animal.id),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(get_attachments_for_animal(&db, animal.id).await?.len(), 1);

        let dangling = attach_file(
            &db,
            NewAttachment {
                path: "photos/ghost.jpg".to_string(),
                animal_id: Some(animal.id + 100),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(dangling, Err(Error::Database(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_path_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let result = attach_file(&db, NewAttachment::default()).await;
        assert!(result.unwrap_err().validation_errors().unwrap().has_field("path"));
        Ok(())
    }
}
