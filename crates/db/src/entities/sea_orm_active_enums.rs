//! Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `entry_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_type")]
pub enum EntryType {
    /// Revenue.
    #[sea_orm(string_value = "PRODUCT")]
    Product,
    /// Cost.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

impl From<africanut_core::ledger::EntryType> for EntryType {
    fn from(value: africanut_core::ledger::EntryType) -> Self {
        match value {
            africanut_core::ledger::EntryType::Product => Self::Product,
            africanut_core::ledger::EntryType::Expense => Self::Expense,
        }
    }
}

impl From<EntryType> for africanut_core::ledger::EntryType {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Product => Self::Product,
            EntryType::Expense => Self::Expense,
        }
    }
}
