//! Entity re-exports.

pub use super::accounting_entries::Entity as AccountingEntries;
pub use super::companies::Entity as Companies;
pub use super::documents::Entity as Documents;
pub use super::users::Entity as Users;
