//! Reports derived from the accounting journal.
//!
//! - Journal export rows and CSV rendering
//! - Profit and loss
//! - Balance sheet by account class

pub mod balance_sheet;
pub mod error;
pub mod export;
pub mod pnl;
pub mod render;
pub mod service;

#[cfg(test)]
mod tests;

pub use balance_sheet::{
    BALANCE_TOLERANCE, BalanceSheet, BalanceSheetLine, BalanceSheetOptions, BalanceSheetReport,
    SignConvention, compute_balance_sheet,
};
pub use error::ReportError;
pub use export::{ExportRow, JournalExport, ReportPeriod, build_journal, format_row};
pub use pnl::{PnlLine, PnlReport, PnlTotals, build_pnl, compute_pnl};
pub use render::{journal_csv_filename, render_journal_csv};
pub use service::ReportService;
