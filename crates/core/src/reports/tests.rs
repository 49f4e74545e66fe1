//! Property-based tests for reports and entry filtering.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance_sheet::{BalanceSheetOptions, compute_balance_sheet};
use super::pnl::compute_pnl;
use crate::ledger::test_support::posting;
use crate::ledger::{AccountingEntry, EntryFilter, EntryType};

fn account(class: u8) -> String {
    format!("{class}01000")
}

prop_compose! {
    fn arb_entry()(
        is_product in any::<bool>(),
        cents in 0i64..100_000_000,
        day in 1u32..=28,
        debit in proptest::option::of(1u8..=7),
        credit in proptest::option::of(1u8..=7),
    ) -> AccountingEntry {
        let entry_type = if is_product { EntryType::Product } else { EntryType::Expense };
        let debit = debit.map(account);
        let credit = credit.map(account);
        let mut e = posting(entry_type, Decimal::new(cents, 2), debit.as_deref(), credit.as_deref());
        e.date = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
        e
    }
}

prop_compose! {
    /// A posting between classes 1, 2 and 5 with both sides present.
    fn arb_matched_posting()(
        cents in 1i64..100_000_000,
        debit in prop::sample::select(vec![1u8, 2, 5]),
        credit in prop::sample::select(vec![1u8, 2, 5]),
    ) -> AccountingEntry {
        posting(
            EntryType::Expense,
            Decimal::new(cents, 2),
            Some(account(debit).as_str()),
            Some(account(credit).as_str()),
        )
    }
}

proptest! {
    /// Date bounds select exactly the entries inside the window, oldest first.
    #[test]
    fn prop_date_filter_is_exact_and_ordered(
        entries in prop::collection::vec(arb_entry(), 0..40),
        a in 1u32..=28,
        b in 1u32..=28,
    ) {
        let (lo, hi) = (a.min(b), a.max(b));
        let start = NaiveDate::from_ymd_opt(2024, 2, lo).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, hi).unwrap();
        let filter = EntryFilter {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        };

        let expected = entries.iter().filter(|e| e.date >= start && e.date <= end).count();
        let selected = filter.apply(entries);

        prop_assert_eq!(selected.len(), expected);
        prop_assert!(selected.iter().all(|e| e.date >= start && e.date <= end));
        prop_assert!(selected.windows(2).all(|w| w[0].date <= w[1].date));
    }

    /// The class filter keeps exactly the entries touching that class on either side.
    #[test]
    fn prop_account_class_filter(
        entries in prop::collection::vec(arb_entry(), 0..40),
        class in 1u8..=7,
    ) {
        let prefix = class.to_string();
        let filter = EntryFilter {
            account_class: Some(prefix.clone()),
            ..Default::default()
        };
        let touches = |e: &AccountingEntry| {
            e.debit_account.as_deref().is_some_and(|a| a.starts_with(&prefix))
                || e.credit_account.as_deref().is_some_and(|a| a.starts_with(&prefix))
        };

        let expected = entries.iter().filter(|e| touches(e)).count();
        let selected = filter.apply(entries);

        prop_assert_eq!(selected.len(), expected);
        prop_assert!(selected.iter().all(touches));
    }

    /// P&L is pure and insensitive to input order.
    #[test]
    fn prop_pnl_is_order_invariant(entries in prop::collection::vec(arb_entry(), 0..40)) {
        let first = compute_pnl(&entries);
        prop_assert_eq!(compute_pnl(&entries), first);

        let mut reversed = entries.clone();
        reversed.reverse();
        prop_assert_eq!(compute_pnl(&reversed), first);

        prop_assert_eq!(first.net_result, first.total_revenue - first.total_expense);
        if first.total_revenue <= Decimal::ZERO {
            prop_assert_eq!(first.margin_pct, Decimal::ZERO);
        }
    }

    /// Matched postings across classes 1, 2 and 5 always balance.
    #[test]
    fn prop_matched_postings_balance(entries in prop::collection::vec(arb_matched_posting(), 1..30)) {
        let sheet = compute_balance_sheet(&entries, BalanceSheetOptions::default()).unwrap();

        prop_assert!(sheet.is_balanced);
        prop_assert_eq!(sheet.imbalance_amount, None);
    }

    /// Dropping one credit leg shows up as an imbalance of exactly that amount.
    #[test]
    fn prop_dropped_credit_is_reported(
        entries in prop::collection::vec(arb_matched_posting(), 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut entries = entries;
        let victim = pick.index(entries.len());
        entries[victim].credit_account = None;
        let injected = entries[victim].amount;

        let sheet = compute_balance_sheet(&entries, BalanceSheetOptions::default()).unwrap();

        prop_assert!(!sheet.is_balanced);
        prop_assert_eq!(sheet.imbalance_amount, Some(injected));
    }
}
