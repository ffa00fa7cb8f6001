//! Money owed entity - Debts owed to the rescue.
//!
//! Only `amount_owed` and `amount_paid` are stored. The outstanding balance
//! and the fully-paid state are computed on every read from those two columns.

use super::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Money owed database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "money_owed")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When it happened
    pub date: DateTime,
    /// Always greater than zero
    #[sea_orm(column_type = "Text")]
    pub amount_owed: Money,
    /// Amount repaid so far
    #[sea_orm(column_type = "Text")]
    pub amount_paid: Money,
    /// When the last repayment was made
    pub date_paid: Option<DateTime>,
    /// Who owes the money
    pub debtor_name: Option<String>,
    /// What the money is owed for
    pub reason: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime,
    /// When the row was last changed
    pub updated_at: DateTime,
}

impl Model {
    /// Amount still owed: `amount_owed - amount_paid`.
    #[must_use]
    pub fn total_owed(&self) -> Money {
        self.amount_owed - self.amount_paid
    }

    /// `amount_paid >= amount_owed`.
    #[must_use]
    pub fn is_fully_paid(&self) -> bool {
        self.amount_paid >= self.amount_owed
    }
}

/// `MoneyOwed` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
