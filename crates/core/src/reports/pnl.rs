//! Profit and loss.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::ledger::{AccountingEntry, EntryType, LEDGER_CURRENCY};

/// Headline P&L figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlTotals {
    /// Sum of PRODUCT amounts.
    pub total_revenue: Decimal,
    /// Sum of EXPENSE amounts.
    pub total_expense: Decimal,
    /// Revenue minus expense. May be negative.
    pub net_result: Decimal,
    /// Net result as a percentage of revenue, 0 when there is no revenue.
    ///
    /// Kept exact; shown with two decimals.
    #[serde(serialize_with = "two_decimals")]
    pub margin_pct: Decimal,
}

fn two_decimals<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    Serialize::serialize(&value.round_dp(2), serializer)
}

/// Computes P&L totals. Input order does not matter.
#[must_use]
pub fn compute_pnl(entries: &[AccountingEntry]) -> PnlTotals {
    let sum_of = |entry_type: EntryType| -> Decimal {
        entries
            .iter()
            .filter(|e| e.entry_type == entry_type)
            .map(|e| e.amount)
            .sum()
    };

    let total_revenue = sum_of(EntryType::Product);
    let total_expense = sum_of(EntryType::Expense);
    let net_result = total_revenue - total_expense;
    let margin_pct = if total_revenue > Decimal::ZERO {
        net_result * Decimal::ONE_HUNDRED / total_revenue
    } else {
        Decimal::ZERO
    };

    PnlTotals {
        total_revenue,
        total_expense,
        net_result,
        margin_pct,
    }
}

/// One line of the revenue or expense section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlLine {
    /// Entry date.
    pub date: NaiveDate,
    /// Entry description, "N/A" when absent.
    pub label: String,
    /// Amount in XAF.
    pub amount: Decimal,
}

impl From<&AccountingEntry> for PnlLine {
    fn from(entry: &AccountingEntry) -> Self {
        Self {
            date: entry.date,
            label: entry
                .label
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            amount: entry.amount,
        }
    }
}

/// P&L with its line items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlReport {
    /// Period heading.
    pub period: String,
    /// Headline figures.
    #[serde(flatten)]
    pub totals: PnlTotals,
    /// Revenue lines (class 7).
    pub revenue_lines: Vec<PnlLine>,
    /// Expense lines (class 6).
    pub expense_lines: Vec<PnlLine>,
    /// Currency of all amounts.
    pub currency: String,
}

/// Builds the P&L. An empty entry list yields zero totals.
#[must_use]
pub fn build_pnl(entries: &[AccountingEntry], period: String) -> PnlReport {
    let lines_of = |entry_type: EntryType| -> Vec<PnlLine> {
        entries
            .iter()
            .filter(|e| e.entry_type == entry_type)
            .map(PnlLine::from)
            .collect()
    };

    PnlReport {
        period,
        totals: compute_pnl(entries),
        revenue_lines: lines_of(EntryType::Product),
        expense_lines: lines_of(EntryType::Expense),
        currency: LEDGER_CURRENCY.to_string(),
    }
}
