//! Entry selection criteria.
//!
//! `EntryCriteria` is what callers send. `EntryFilter` is the same request
//! after the company slug has been resolved, and is what stores evaluate.

use africanut_shared::types::CompanyId;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};

use super::entry::AccountingEntry;

/// Optional selection criteria for listing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryCriteria {
    /// Company handle. Blank counts as absent.
    pub company_slug: Option<String>,
    /// Inclusive lower bound on the entry date. Blank counts as absent.
    #[serde(default, deserialize_with = "blank_date")]
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the entry date. Blank counts as absent.
    #[serde(default, deserialize_with = "blank_date")]
    pub end_date: Option<NaiveDate>,
    /// Prefix matched against the debit or credit account. Blank counts as absent.
    pub account_class: Option<String>,
}

/// Reads `YYYY-MM-DD`, treating an empty value as no date.
fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match non_blank(raw.as_deref()) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

impl EntryCriteria {
    /// Company slug, if one was actually supplied.
    #[must_use]
    pub fn company_slug(&self) -> Option<&str> {
        non_blank(self.company_slug.as_deref())
    }

    /// Account-class prefix, if one was actually supplied.
    #[must_use]
    pub fn account_class(&self) -> Option<&str> {
        non_blank(self.account_class.as_deref())
    }

    /// Same criteria without the account-class restriction.
    #[must_use]
    pub fn without_account_class(&self) -> Self {
        Self {
            account_class: None,
            ..self.clone()
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolved filter evaluated by entry stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Restrict to one company.
    pub company_id: Option<CompanyId>,
    /// Inclusive lower date bound.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub end_date: Option<NaiveDate>,
    /// Debit-or-credit account prefix.
    pub account_class: Option<String>,
}

impl EntryFilter {
    /// Builds a filter from criteria and an already resolved company.
    #[must_use]
    pub fn from_criteria(criteria: &EntryCriteria, company_id: Option<CompanyId>) -> Self {
        Self {
            company_id,
            start_date: criteria.start_date,
            end_date: criteria.end_date,
            account_class: criteria.account_class().map(str::to_string),
        }
    }

    /// Whether an entry satisfies every set bound.
    #[must_use]
    pub fn matches(&self, entry: &AccountingEntry) -> bool {
        if self.company_id.is_some_and(|id| id != entry.company_id) {
            return false;
        }
        if self.start_date.is_some_and(|start| entry.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| entry.date > end) {
            return false;
        }
        match self.account_class.as_deref() {
            None => true,
            Some(prefix) => [&entry.debit_account, &entry.credit_account]
                .into_iter()
                .flatten()
                .any(|account| account.starts_with(prefix)),
        }
    }

    /// Keeps matching entries in chronological order.
    ///
    /// Ties on date are broken by creation time, then ID, so the order is
    /// stable across calls.
    #[must_use]
    pub fn apply(&self, entries: impl IntoIterator<Item = AccountingEntry>) -> Vec<AccountingEntry> {
        let mut selected: Vec<_> = entries.into_iter().filter(|e| self.matches(e)).collect();
        sort_chronologically(&mut selected);
        selected
    }
}

/// Sorts entries by date, then creation time, then ID.
pub fn sort_chronologically(entries: &mut [AccountingEntry]) {
    entries.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::test_support::entry;
    use crate::ledger::EntryType;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_blank_values_count_as_absent() {
        let criteria = EntryCriteria {
            company_slug: Some("   ".into()),
            account_class: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(criteria.company_slug(), None);
        assert_eq!(criteria.account_class(), None);
        assert_eq!(EntryFilter::from_criteria(&criteria, None), EntryFilter::default());
    }

    #[test]
    fn test_blank_dates_deserialize_as_absent() {
        let criteria: EntryCriteria = serde_json::from_str(
            r#"{"companySlug":"","startDate":"","endDate":"  ","accountClass":""}"#,
        )
        .unwrap();
        assert_eq!(criteria.start_date, None);
        assert_eq!(criteria.end_date, None);

        let criteria: EntryCriteria =
            serde_json::from_str(r#"{"startDate":"2024-01-10"}"#).unwrap();
        assert_eq!(criteria.start_date, Some(date(2024, 1, 10)));
        assert_eq!(criteria.end_date, None);

        assert!(serde_json::from_str::<EntryCriteria>(r#"{"startDate":"10/01/2024"}"#).is_err());
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let filter = EntryFilter {
            start_date: Some(date(2024, 1, 10)),
            end_date: Some(date(2024, 1, 15)),
            ..Default::default()
        };
        let company = CompanyId::new();
        let on_start = entry(company, EntryType::Product, dec!(1), date(2024, 1, 10));
        let on_end = entry(company, EntryType::Product, dec!(1), date(2024, 1, 15));
        let after = entry(company, EntryType::Product, dec!(1), date(2024, 1, 16));

        assert!(filter.matches(&on_start));
        assert!(filter.matches(&on_end));
        assert!(!filter.matches(&after));
    }

    #[test]
    fn test_account_class_matches_either_side() {
        let company = CompanyId::new();
        let mut debit_side = entry(company, EntryType::Expense, dec!(10), date(2024, 1, 1));
        debit_side.debit_account = Some("601000".into());
        debit_side.credit_account = Some("512000".into());
        let mut credit_side = entry(company, EntryType::Product, dec!(10), date(2024, 1, 1));
        credit_side.debit_account = None;
        credit_side.credit_account = Some("6031".into());
        let mut neither = entry(company, EntryType::Product, dec!(10), date(2024, 1, 1));
        neither.debit_account = Some("512000".into());
        neither.credit_account = Some("701000".into());

        let filter = EntryFilter {
            account_class: Some("6".into()),
            ..Default::default()
        };
        assert!(filter.matches(&debit_side));
        assert!(filter.matches(&credit_side));
        assert!(!filter.matches(&neither));
    }

    #[test]
    fn test_apply_sorts_by_date() {
        let company = CompanyId::new();
        let late = entry(company, EntryType::Product, dec!(1), date(2024, 3, 1));
        let early = entry(company, EntryType::Product, dec!(1), date(2024, 1, 1));
        let other_company = entry(CompanyId::new(), EntryType::Product, dec!(1), date(2024, 2, 1));

        let filter = EntryFilter {
            company_id: Some(company),
            ..Default::default()
        };
        let result = filter.apply(vec![late.clone(), other_company, early.clone()]);

        assert_eq!(result, vec![early, late]);
    }

    #[test]
    fn test_inverted_range_selects_nothing() {
        let company = CompanyId::new();
        let filter = EntryFilter {
            start_date: Some(date(2024, 2, 1)),
            end_date: Some(date(2024, 1, 1)),
            ..Default::default()
        };
        let result = filter.apply(vec![entry(company, EntryType::Product, dec!(1), date(2024, 1, 15))]);
        assert!(result.is_empty());
    }
}
