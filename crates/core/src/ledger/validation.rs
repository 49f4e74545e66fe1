//! Boundary validation for entry write requests.
//!
//! Request bodies arrive loosely typed. They are checked here, before any
//! store access, so a bad request never reaches a write.

use africanut_shared::types::DocumentId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::entry::EntryType;
use super::error::LedgerError;

/// Raw create/update request body.
///
/// `amount` accepts a JSON number or a numeric string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPayload {
    /// Free-text description.
    pub label: Option<String>,
    /// Entry type, expected to be `PRODUCT` or `EXPENSE`.
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    /// Amount in XAF.
    pub amount: Option<Decimal>,
    /// Owning company handle.
    pub company_slug: Option<String>,
    /// Transaction date.
    pub date: Option<NaiveDate>,
    /// Journal of record.
    pub journal_code: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Account debited.
    pub debit_account: Option<String>,
    /// Account credited.
    pub credit_account: Option<String>,
    /// Supporting document type.
    pub document_type: Option<String>,
    /// Supporting document number.
    pub document_number: Option<String>,
    /// Supporting document date.
    pub document_date: Option<NaiveDate>,
    /// Document to link.
    pub document_id: Option<DocumentId>,
}

/// Payload fields that passed shape validation.
///
/// The company slug is still unresolved at this point.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayload {
    /// Revenue or cost.
    pub entry_type: EntryType,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Trimmed, non-blank company handle.
    pub company_slug: String,
    /// Free-text description.
    pub label: Option<String>,
    /// Transaction date.
    pub date: Option<NaiveDate>,
    /// Journal of record.
    pub journal_code: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Account debited.
    pub debit_account: Option<String>,
    /// Account credited.
    pub credit_account: Option<String>,
    /// Supporting document type.
    pub document_type: Option<String>,
    /// Supporting document number.
    pub document_number: Option<String>,
    /// Supporting document date.
    pub document_date: Option<NaiveDate>,
    /// Document to link.
    pub document_id: Option<DocumentId>,
}

/// Most fractional digits an amount may carry.
pub const AMOUNT_MAX_SCALE: u32 = 4;

/// Exclusive upper bound on amounts (10^15), the integer range of `NUMERIC(19, 4)`.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Checks the payload shape.
///
/// Order: company slug presence, entry type, amount.
///
/// # Errors
///
/// `InvalidCompany` for a missing or blank slug, `InvalidType` for a type
/// outside the enumeration, `InvalidAmount` for a missing or negative amount,
/// one with more than four decimals, or one at or above [`AMOUNT_LIMIT`].
pub fn validate_payload(payload: EntryPayload) -> Result<ValidatedPayload, LedgerError> {
    let company_slug = payload
        .company_slug
        .as_deref()
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
        .ok_or_else(|| LedgerError::InvalidCompany(String::new()))?;

    let entry_type: EntryType = payload
        .entry_type
        .as_deref()
        .unwrap_or_default()
        .parse()?;

    let amount = match payload.amount {
        Some(amount)
            if amount >= Decimal::ZERO
                && amount < AMOUNT_LIMIT
                && amount.normalize().scale() <= AMOUNT_MAX_SCALE =>
        {
            amount
        }
        _ => return Err(LedgerError::InvalidAmount),
    };

    Ok(ValidatedPayload {
        entry_type,
        amount,
        company_slug,
        label: payload.label,
        date: payload.date,
        journal_code: payload.journal_code,
        reference: payload.reference,
        debit_account: payload.debit_account,
        credit_account: payload.credit_account,
        document_type: payload.document_type,
        document_number: payload.document_number,
        document_date: payload.document_date,
        document_id: payload.document_id,
    })
}
