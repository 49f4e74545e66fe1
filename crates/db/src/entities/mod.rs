//! `SeaORM` entities.

pub mod prelude;

pub mod accounting_entries;
pub mod companies;
pub mod documents;
pub mod sea_orm_active_enums;
pub mod users;
