//! Balance sheet derived from account-class balances.
//!
//! Recomputed from the full filtered entry set on every request. Each entry
//! adds its amount to the class of its debit account and subtracts it from
//! the class of its credit account.

use std::collections::BTreeMap;

use africanut_shared::LedgerConfig;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ReportError;
use crate::ledger::account_class::class_digit;
use crate::ledger::{AccountingEntry, ClassDigits, LEDGER_CURRENCY, LedgerError};

/// Largest gap between assets and liabilities still reported as balanced.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// How class balances are read when totalling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignConvention {
    /// Classes 1 and 7 are read on their credit side, so matching debits and
    /// credits produce a balanced sheet.
    #[default]
    Normalized,
    /// Every class keeps its raw debit-minus-credit balance.
    Legacy,
}

/// Balance sheet computation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BalanceSheetOptions {
    /// Width of the class key.
    pub class_digits: ClassDigits,
    /// Sign convention for totals.
    pub sign_convention: SignConvention,
}

impl TryFrom<&LedgerConfig> for BalanceSheetOptions {
    type Error = LedgerError;

    fn try_from(config: &LedgerConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            class_digits: ClassDigits::try_from(config)?,
            sign_convention: if config.legacy_balance_signs {
                SignConvention::Legacy
            } else {
                SignConvention::Normalized
            },
        })
    }
}

/// A presented line of the balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetLine {
    /// Heading, e.g. "Classe 5: Disponibilités".
    pub label: String,
    /// Amount in XAF.
    pub amount: Decimal,
}

/// Balance sheet report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Raw debit-minus-credit balance per class key.
    pub per_class_balance: BTreeMap<String, Decimal>,
    /// Fixed assets, inventory, cash and debit-side third parties.
    pub total_assets: Decimal,
    /// Permanent capital and credit-side third parties.
    pub total_liabilities: Decimal,
    /// Revenue minus expenses.
    pub net_result: Decimal,
    /// `total_liabilities + net_result`.
    pub total_liabilities_and_equity: Decimal,
    /// Whether assets match liabilities and equity within tolerance.
    pub is_balanced: bool,
    /// Absolute gap, present only when unbalanced.
    pub imbalance_amount: Option<Decimal>,
    /// Asset side lines.
    pub assets: Vec<BalanceSheetLine>,
    /// Liability side lines.
    pub liabilities: Vec<BalanceSheetLine>,
}

/// Per-class report with period heading.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetReport {
    /// Period heading.
    pub period: String,
    /// Computed sheet.
    #[serde(flatten)]
    pub sheet: BalanceSheet,
    /// Currency of all amounts.
    pub currency: String,
}

/// Nets debit and credit contributions per class key.
#[must_use]
pub fn class_balances(
    entries: &[AccountingEntry],
    digits: ClassDigits,
) -> BTreeMap<String, Decimal> {
    let mut balances: BTreeMap<String, Decimal> = BTreeMap::new();
    for entry in entries {
        if let Some(key) = entry.debit_account.as_deref().and_then(|c| digits.class_key(c)) {
            *balances.entry(key).or_default() += entry.amount;
        }
        if let Some(key) = entry.credit_account.as_deref().and_then(|c| digits.class_key(c)) {
            *balances.entry(key).or_default() -= entry.amount;
        }
    }
    balances
}

#[derive(Debug, Default)]
struct ClassTotals {
    capital: Decimal,
    fixed_assets: Decimal,
    inventory: Decimal,
    receivables: Decimal,
    payables: Decimal,
    cash: Decimal,
    expenses: Decimal,
    revenue: Decimal,
}

impl ClassTotals {
    /// Groups keyed balances by leading digit. Class 4 is split per key by sign.
    fn from_balances(balances: &BTreeMap<String, Decimal>) -> Self {
        let mut totals = Self::default();
        for (key, balance) in balances {
            let balance = *balance;
            match class_digit(key) {
                Some(1) => totals.capital += balance,
                Some(2) => totals.fixed_assets += balance,
                Some(3) => totals.inventory += balance,
                Some(4) if balance > Decimal::ZERO => totals.receivables += balance,
                Some(4) if balance < Decimal::ZERO => totals.payables += balance.abs(),
                Some(5) => totals.cash += balance,
                Some(6) => totals.expenses += balance,
                Some(7) => totals.revenue += balance,
                _ => {}
            }
        }
        totals
    }
}

/// Computes the balance sheet.
///
/// # Errors
///
/// Returns `NoDataFound` for an empty entry list, so that no fabricated zero
/// sheet is ever presented.
pub fn compute_balance_sheet(
    entries: &[AccountingEntry],
    options: BalanceSheetOptions,
) -> Result<BalanceSheet, ReportError> {
    if entries.is_empty() {
        return Err(ReportError::NoDataFound);
    }

    let per_class_balance = class_balances(entries, options.class_digits);
    let classes = ClassTotals::from_balances(&per_class_balance);

    let (capital, net_result) = match options.sign_convention {
        SignConvention::Normalized => (-classes.capital, -classes.revenue - classes.expenses),
        SignConvention::Legacy => (classes.capital, classes.revenue - classes.expenses),
    };

    let total_assets = classes.fixed_assets + classes.inventory + classes.cash + classes.receivables;
    let total_liabilities = capital + classes.payables;
    let total_liabilities_and_equity = total_liabilities + net_result;
    let gap = (total_assets - total_liabilities_and_equity).abs();
    let is_balanced = gap < BALANCE_TOLERANCE;

    let line = |label: &str, amount: Decimal| BalanceSheetLine {
        label: label.to_string(),
        amount,
    };

    Ok(BalanceSheet {
        per_class_balance,
        total_assets,
        total_liabilities,
        net_result,
        total_liabilities_and_equity,
        is_balanced,
        imbalance_amount: (!is_balanced).then_some(gap),
        assets: vec![
            line("Classe 2: Actif immobilisé", classes.fixed_assets),
            line("Classe 3: Stocks", classes.inventory),
            line("Classe 5: Disponibilités", classes.cash),
            line("Classe 4: Comptes de tiers (Actif)", classes.receivables),
        ],
        liabilities: vec![
            line("Classe 1: Capitaux permanents", capital),
            line("Classe 4: Dettes", classes.payables),
            line("Résultat de l'exercice", net_result),
        ],
    })
}

/// Wraps a computed sheet with its heading.
#[must_use]
pub fn build_balance_sheet_report(sheet: BalanceSheet, period: String) -> BalanceSheetReport {
    BalanceSheetReport {
        period,
        sheet,
        currency: LEDGER_CURRENCY.to_string(),
    }
}
