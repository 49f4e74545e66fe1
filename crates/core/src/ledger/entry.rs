//! Accounting entry domain types.

use std::fmt;
use std::str::FromStr;

use africanut_shared::types::{CompanyId, DocumentId, EntryId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Currency every ledger amount is expressed in.
pub const LEDGER_CURRENCY: &str = "XAF";

/// Journal used when an entry does not name one (miscellaneous operations).
pub const DEFAULT_JOURNAL_CODE: &str = "OD";

/// Classifies an entry as revenue or cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Revenue.
    Product,
    /// Cost.
    Expense,
}

impl EntryType {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "PRODUCT",
            Self::Expense => "EXPENSE",
        }
    }

    /// Label used in journal exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Product => "Produit",
            Self::Expense => "Charge",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRODUCT" => Ok(Self::Product),
            "EXPENSE" => Ok(Self::Expense),
            other => Err(LedgerError::InvalidType(other.to_string())),
        }
    }
}

/// A company of the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Company ID.
    pub id: CompanyId,
    /// Unique URL-safe handle.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Business sector.
    pub sector: Option<String>,
    /// Short description.
    pub tagline: Option<String>,
}

impl Company {
    /// Projection embedded in entries.
    #[must_use]
    pub fn summary(&self) -> CompanySummary {
        CompanySummary {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// Company fields returned alongside an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    /// Company ID.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// URL-safe handle.
    pub slug: String,
}

/// User fields returned alongside an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: Option<String>,
    /// Login email.
    pub email: String,
}

/// A supporting document linked to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    /// Document ID.
    pub id: DocumentId,
    /// Human label.
    pub label: Option<String>,
    /// Storage location of the file.
    pub path: Option<String>,
    /// MIME type of the file.
    pub mime_type: Option<String>,
}

/// One financial transaction line.
///
/// `amount` is always a non-negative magnitude. Direction comes from which
/// side an account appears on and from `entry_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingEntry {
    /// Entry ID.
    pub id: EntryId,
    /// Revenue or cost.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Amount in XAF.
    pub amount: Decimal,
    /// Free-text description.
    pub label: Option<String>,
    /// Account debited.
    pub debit_account: Option<String>,
    /// Account credited.
    pub credit_account: Option<String>,
    /// Owning company.
    pub company_id: CompanyId,
    /// Owning company, when loaded.
    pub company: Option<CompanySummary>,
    /// Transaction date.
    pub date: NaiveDate,
    /// Journal of record.
    pub journal_code: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Supporting document type.
    pub document_type: Option<String>,
    /// Supporting document number.
    pub document_number: Option<String>,
    /// Supporting document date.
    pub document_date: Option<NaiveDate>,
    /// Linked documents (zero or one in practice).
    pub documents: Vec<DocumentRef>,
    /// User who recorded the entry.
    pub created_by_id: UserId,
    /// Creator, when loaded.
    pub created_by: Option<UserSummary>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl AccountingEntry {
    /// Journal code, falling back to the miscellaneous operations journal.
    #[must_use]
    pub fn journal_or_default(&self) -> &str {
        self.journal_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .unwrap_or(DEFAULT_JOURNAL_CODE)
    }

    /// ID of the first linked document.
    #[must_use]
    pub fn first_document_id(&self) -> Option<DocumentId> {
        self.documents.first().map(|doc| doc.id)
    }
}

/// Validated fields for a new entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    /// Revenue or cost.
    pub entry_type: EntryType,
    /// Amount in XAF.
    pub amount: Decimal,
    /// Free-text description.
    pub label: Option<String>,
    /// Account debited.
    pub debit_account: Option<String>,
    /// Account credited.
    pub credit_account: Option<String>,
    /// Owning company.
    pub company_id: CompanyId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Journal of record.
    pub journal_code: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Supporting document type.
    pub document_type: Option<String>,
    /// Supporting document number.
    pub document_number: Option<String>,
    /// Supporting document date.
    pub document_date: Option<NaiveDate>,
    /// Document to link.
    pub document_id: Option<DocumentId>,
    /// Recording user.
    pub created_by_id: UserId,
}

/// Full replacement of an entry's editable fields.
///
/// `None` clears the stored value, except for `date` which is kept, and
/// `document_id` which clears every document link.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryChanges {
    /// Revenue or cost.
    pub entry_type: EntryType,
    /// Amount in XAF.
    pub amount: Decimal,
    /// Free-text description.
    pub label: Option<String>,
    /// Account debited.
    pub debit_account: Option<String>,
    /// Account credited.
    pub credit_account: Option<String>,
    /// Owning company.
    pub company_id: CompanyId,
    /// New transaction date, if any.
    pub date: Option<NaiveDate>,
    /// Journal of record.
    pub journal_code: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Supporting document type.
    pub document_type: Option<String>,
    /// Supporting document number.
    pub document_number: Option<String>,
    /// Supporting document date.
    pub document_date: Option<NaiveDate>,
    /// Document to link.
    pub document_id: Option<DocumentId>,
}
