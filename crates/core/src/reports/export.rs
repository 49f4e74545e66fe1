//! Journal export rows.
//!
//! Every export target (JSON table, CSV, spreadsheet, PDF) consumes the same
//! `ExportRow` shape. Only the renderer differs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ReportError;
use crate::ledger::{AccountingEntry, LEDGER_CURRENCY};

const MISSING: &str = "N/A";

/// One journal line, keyed by its French column header.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// Entry date, dd/mm/yyyy.
    #[serde(rename = "Date")]
    pub date: String,
    /// "Produit" or "Charge".
    #[serde(rename = "Type d'écriture")]
    pub entry_type: String,
    /// Account debited.
    #[serde(rename = "Compte Débit")]
    pub debit_account: String,
    /// Account credited.
    #[serde(rename = "Compte Crédit")]
    pub credit_account: String,
    /// Entry description.
    #[serde(rename = "Libellé")]
    pub label: String,
    /// Amount in XAF.
    #[serde(rename = "Montant")]
    pub amount: Decimal,
    /// Always XAF.
    #[serde(rename = "Devise")]
    pub currency: String,
    /// Journal code, "OD" by default.
    #[serde(rename = "Journal")]
    pub journal: String,
    /// External reference.
    #[serde(rename = "Référence")]
    pub reference: String,
    /// Supporting document type.
    #[serde(rename = "Type Justificatif")]
    pub document_type: String,
    /// Supporting document number.
    #[serde(rename = "Numéro Justificatif")]
    pub document_number: String,
    /// Supporting document date, dd/mm/yyyy.
    #[serde(rename = "Date Justificatif")]
    pub document_date: String,
    /// First linked document.
    #[serde(rename = "Document ID")]
    pub document_id: String,
    /// Company name.
    #[serde(rename = "Entreprise")]
    pub company: String,
}

/// Formats a date the way French locales print it.
#[must_use]
pub fn format_date_fr(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn text_or_missing(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

/// Maps an entry to its export row.
#[must_use]
pub fn format_row(entry: &AccountingEntry) -> ExportRow {
    ExportRow {
        date: format_date_fr(entry.date),
        entry_type: entry.entry_type.label().to_string(),
        debit_account: text_or_missing(entry.debit_account.as_deref()),
        credit_account: text_or_missing(entry.credit_account.as_deref()),
        label: text_or_missing(entry.label.as_deref()),
        amount: entry.amount,
        currency: LEDGER_CURRENCY.to_string(),
        journal: entry.journal_or_default().to_string(),
        reference: text_or_missing(entry.reference.as_deref()),
        document_type: text_or_missing(entry.document_type.as_deref()),
        document_number: text_or_missing(entry.document_number.as_deref()),
        document_date: entry
            .document_date
            .map_or_else(|| MISSING.to_string(), format_date_fr),
        document_id: entry
            .first_document_id()
            .map_or_else(|| MISSING.to_string(), |id| id.to_string()),
        company: text_or_missing(entry.company.as_ref().map(|c| c.name.as_str())),
    }
}

/// Date window a report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportPeriod {
    /// Inclusive lower bound.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub end: Option<NaiveDate>,
}

impl ReportPeriod {
    /// Heading printed on exported documents.
    ///
    /// A window is only shown when both bounds are known.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => format!(
                "Période: Du {} au {}",
                format_date_fr(start),
                format_date_fr(end)
            ),
            _ => "Période: Toutes dates".to_string(),
        }
    }
}

/// Journal ready for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalExport {
    /// Period heading.
    pub period: String,
    /// Rows in chronological order.
    pub rows: Vec<ExportRow>,
    /// Sum of every row amount.
    pub grand_total: Decimal,
    /// Currency of all amounts.
    pub currency: String,
}

/// Builds the journal for a chronologically ordered entry list.
///
/// # Errors
///
/// Returns `NoDataFound` when `entries` is empty.
pub fn build_journal(
    entries: &[AccountingEntry],
    period: ReportPeriod,
) -> Result<JournalExport, ReportError> {
    if entries.is_empty() {
        return Err(ReportError::NoDataFound);
    }
    Ok(JournalExport {
        period: period.label(),
        rows: entries.iter().map(format_row).collect(),
        grand_total: entries.iter().map(|e| e.amount).sum(),
        currency: LEDGER_CURRENCY.to_string(),
    })
}
