//! Ledger and report logic for the Africanut group.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached only through the `EntryStore` trait.
//!
//! # Modules
//!
//! - `ledger` - Accounting entries, filtering, validation and mutations
//! - `reports` - Journal export, profit and loss, balance sheet

pub mod ledger;
pub mod reports;
