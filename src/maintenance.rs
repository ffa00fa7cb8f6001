//! Store maintenance: row counts and demonstration seeding.
//!
//! Everything here talks to the store file with raw SQL statements rather
//! than through the entity layer, so it keeps working against stores written
//! by older schema revisions. The soft-delete convention is still honoured:
//! counts skip rows with `is_deleted` set, and fall back to counting every row
//! when a table has no such column.

use crate::entities::Money;
use crate::errors::{Error, Result};
use chrono::Utc;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbErr, Statement, TransactionTrait, Value,
};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Active row counts for the tables the maintenance report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    /// Active rows in `animals`
    pub animals: u64,
    /// Active rows in `people`
    pub people: u64,
    /// Active rows in `vet_visits`
    pub vet_visits: u64,
}

impl StoreCounts {
    /// Counts non-deleted rows in `animals`, `people` and `vet_visits`.
    ///
    /// # Errors
    /// Returns an error if a table is missing or a query fails for any reason
    /// other than a missing `is_deleted` column.
    pub async fn read<C: ConnectionTrait>(db: &C) -> Result<Self> {
        Ok(Self {
            animals: count_active_rows(db, "animals").await?,
            people: count_active_rows(db, "people").await?,
            vet_visits: count_active_rows(db, "vet_visits").await?,
        })
    }
}

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// One animal and one vet visit for it were inserted.
    Seeded {
        /// Id of the demo animal
        animal_id: i64,
        /// Id of its vet visit
        visit_id: i64,
    },
    /// The store already held animals; nothing was written.
    AlreadyPopulated {
        /// Animal rows found, soft-deleted ones included
        animals: u64,
    },
}

/// What a maintenance run found. Store problems end up in [`Self::Failed`]
/// instead of being returned as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaintenanceReport {
    /// No store file at the given path.
    NotFound {
        /// Path that was checked
        path: PathBuf,
    },
    /// The store was opened, optionally seeded, and counted.
    Inspected {
        /// Seeding result, when seeding was requested
        seed: Option<SeedOutcome>,
        /// Active row counts after any seeding
        counts: StoreCounts,
    },
    /// Opening or querying the store failed.
    Failed {
        /// Description of the underlying problem
        message: String,
    },
}

impl fmt::Display for MaintenanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "Store not found at {}", path.display()),
            Self::Inspected { seed, counts } => {
                match seed {
                    Some(SeedOutcome::Seeded {
                        animal_id,
                        visit_id,
                    }) => writeln!(
                        f,
                        "Seeded demo animal {animal_id} with vet visit {visit_id}"
                    )?,
                    Some(SeedOutcome::AlreadyPopulated { .. }) => {
                        writeln!(f, "Store already contains data, skipping seed")?;
                    }
                    None => {}
                }
                writeln!(f, "Animals: {}", counts.animals)?;
                writeln!(f, "People: {}", counts.people)?;
                write!(f, "Vet visits: {}", counts.vet_visits)
            }
            Self::Failed { message } => write!(f, "Store error: {message}"),
        }
    }
}

/// Inspects the store at `path`, seeding it first when `seed` is set.
///
/// Never fails: a missing file or any store error is described in the
/// returned report.
#[instrument(skip(path), fields(path = %path.display()))]
pub async fn run(path: &Path, seed: bool) -> MaintenanceReport {
    if !path.is_file() {
        warn!("No store file found");
        return MaintenanceReport::NotFound {
            path: path.to_path_buf(),
        };
    }

    match inspect(path, seed).await {
        Ok((seed, counts)) => MaintenanceReport::Inspected { seed, counts },
        Err(e) => {
            error!("Maintenance run failed: {}", e);
            MaintenanceReport::Failed {
                message: e.to_string(),
            }
        }
    }
}

async fn inspect(path: &Path, seed: bool) -> Result<(Option<SeedOutcome>, StoreCounts)> {
    let db = open_existing(path).await?;

    let outcome = if seed {
        Some(seed_demo_records(&db).await?)
    } else {
        None
    };
    let counts = StoreCounts::read(&db).await?;

    db.close().await?;
    Ok((outcome, counts))
}

/// Opens an existing store file without creating it or touching its schema.
///
/// # Errors
/// Returns [`Error::StoreNotFound`] if the file is missing, or a database
/// error if it cannot be opened.
pub async fn open_existing(path: &Path) -> Result<DatabaseConnection> {
    if !path.is_file() {
        return Err(Error::StoreNotFound {
            path: path.to_path_buf(),
        });
    }
    let url = format!("sqlite://{}?mode=rw", path.display());
    Ok(Database::connect(url).await?)
}

/// Counts rows in `table` with `is_deleted` unset. Tables from older schema
/// revisions without that column are counted in full.
///
/// # Errors
/// Returns an error if the table does not exist or the query fails.
pub async fn count_active_rows<C: ConnectionTrait>(db: &C, table: &str) -> Result<u64> {
    let filtered = format!("SELECT COUNT(*) FROM \"{table}\" WHERE is_deleted = 0");
    match count_rows(db, &filtered).await {
        Err(Error::Database(e)) if is_missing_column(&e) => {
            warn!("{} has no is_deleted column, counting every row", table);
            count_rows(db, &format!("SELECT COUNT(*) FROM \"{table}\"")).await
        }
        other => other,
    }
}

fn is_missing_column(err: &DbErr) -> bool {
    err.to_string().contains("no such column")
}

async fn count_rows<C: ConnectionTrait>(db: &C, sql: &str) -> Result<u64> {
    let row = db
        .query_one(Statement::from_string(db.get_database_backend(), sql))
        .await?;
    let count: i64 = match row {
        Some(row) => row.try_get_by_index(0)?,
        None => 0,
    };
    Ok(u64::try_from(count).unwrap_or_default())
}

fn to_id(last_insert_id: u64) -> Result<i64> {
    i64::try_from(last_insert_id).map_err(|e| DbErr::Custom(e.to_string()).into())
}

/// Inserts one demonstration animal and one vet visit for it, all in a single
/// transaction. If any animal row already exists (deleted or not) the
/// transaction is rolled back and nothing is written.
///
/// # Errors
/// Returns an error if a statement fails; the transaction is then dropped
/// and rolled back.
#[instrument(skip(db))]
pub async fn seed_demo_records(db: &DatabaseConnection) -> Result<SeedOutcome> {
    let txn = db.begin().await?;

    let animals = count_rows(&txn, "SELECT COUNT(*) FROM animals").await?;
    if animals > 0 {
        txn.rollback().await?;
        info!("Store already has {} animal(s), skipping seed", animals);
        return Ok(SeedOutcome::AlreadyPopulated { animals });
    }

    let backend = txn.get_database_backend();
    let now = Utc::now().naive_utc();

    let values: [Value; 9] = [
        "Biscuit".into(),
        "Mixed".into(),
        "F".into(),
        "In Care".into(),
        now.into(),
        "Demonstration record".into(),
        now.into(),
        now.into(),
        false.into(),
    ];
    let animal = txn
        .execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO animals \
             (name, breed, sex, status, intake_date, notes, created_at, updated_at, is_deleted) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            values,
        ))
        .await?;
    let animal_id = to_id(animal.last_insert_id())?;

    let values: [Value; 6] = [
        animal_id.into(),
        now.into(),
        Money::new(7500, 2).into(),
        "Intake exam".into(),
        false.into(),
        false.into(),
    ];
    let visit = txn
        .execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO vet_visits \
             (animal_id, visit_date, total_cost, notes, ready_for_adoption, is_deleted) \
             VALUES (?, ?, ?, ?, ?, ?)",
            values,
        ))
        .await?;
    let visit_id = to_id(visit.last_insert_id())?;

    txn.commit().await?;
    info!("Seeded demo animal {} with vet visit {}", animal_id, visit_id);
    Ok(SeedOutcome::Seeded {
        animal_id,
        visit_id,
    })
}
