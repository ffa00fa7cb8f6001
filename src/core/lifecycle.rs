//! Soft-delete lifecycle shared by every entity that carries `is_deleted`.
//!
//! Soft deletion only flips the flag; the row and all of its links stay in
//! place and the flag can be cleared again. Hard deletes live in the
//! per-entity modules because they fire the storage-level referential actions.

use crate::{
    entities::{adoption, animal, expense, income, person, trip, vet_visit},
    errors::{Error, Result},
};
use sea_orm::{Select, prelude::*, sea_query::Expr};
use tracing::info;

/// An entity with an integer `id` and an `is_deleted` flag.
pub trait SoftDelete: EntityTrait {
    /// Primary key column
    fn id_column() -> Self::Column;
    /// Soft delete flag column
    fn deleted_column() -> Self::Column;
}

macro_rules! impl_soft_delete {
    ($($module:ident),* $(,)?) => {
        $(
            impl SoftDelete for $module::Entity {
                fn id_column() -> Self::Column {
                    $module::Column::Id
                }

                fn deleted_column() -> Self::Column {
                    $module::Column::IsDeleted
                }
            }
        )*
    };
}

impl_soft_delete!(animal, person, trip, vet_visit, adoption, expense, income);

/// Base query excluding soft-deleted rows. Every default listing starts here.
pub fn find_active<E: SoftDelete>() -> Select<E> {
    E::find().filter(E::deleted_column().eq(false))
}

/// Marks a row as deleted without removing it.
///
/// # Errors
/// Returns [`Error::NotFound`] if no row has this id.
pub async fn soft_delete<E, C>(db: &C, id: i64) -> Result<()>
where
    E: SoftDelete,
    C: ConnectionTrait,
{
    set_deleted_flag::<E, C>(db, id, true).await
}

/// Clears the soft delete flag.
///
/// # Errors
/// Returns [`Error::NotFound`] if no row has this id.
pub async fn restore<E, C>(db: &C, id: i64) -> Result<()>
where
    E: SoftDelete,
    C: ConnectionTrait,
{
    set_deleted_flag::<E, C>(db, id, false).await
}

async fn set_deleted_flag<E, C>(db: &C, id: i64, deleted: bool) -> Result<()>
where
    E: SoftDelete,
    C: ConnectionTrait,
{
    let table = E::default().table_name().to_string();
    let result = E::update_many()
        .col_expr(E::deleted_column(), Expr::value(deleted))
        .filter(E::id_column().eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound { entity: table, id });
    }

    info!(table = %table, id, deleted, "Soft delete flag updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::Animal;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_soft_delete_hides_but_keeps_row() -> Result<()> {
        let db = setup_test_db().await?;
        let kept = create_test_animal(&db, "Biscuit").await?;
        let hidden = create_test_animal(&db, "Pepper").await?;

        soft_delete::<Animal, _>(&db, hidden.id).await?;

        let active = find_active::<Animal>().all(&db).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.id);

        let raw = Animal::find_by_id(hidden.id).one(&db).await?.unwrap();
        assert!(raw.is_deleted);
        Ok(())
    }

    #[tokio::test]
    async fn test_restore_brings_row_back() -> Result<()> {
        let db = setup_test_db().await?;
        let animal = create_test_animal(&db, "Juniper").await?;

        soft_delete::<Animal, _>(&db, animal.id).await?;
        restore::<Animal, _>(&db, animal.id).await?;

        let active = find_active::<Animal>().all(&db).await?;
        assert_eq!(active.len(), 1);
        assert!(!active[0].is_deleted);
        Ok(())
    }

    #[tokio::test]
    async fn test_soft_delete_unknown_id() -> Result<()> {
        let db = setup_test_db().await?;
        let result = soft_delete::<Animal, _>(&db, 404).await;
        assert!(matches!(result, Err(Error::NotFound { id: 404, .. })));
        Ok(())
    }
}
