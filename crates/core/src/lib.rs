//! # metainsights-core
//!
//! Import Meta Business Suite exports into per-platform tracking sheets.
//!
//! A raw export sheet holds a Facebook section above an Instagram section,
//! each introduced by a marker label in column A. An import:
//!
//! - asks the user to confirm ([`ui::Ui`])
//! - locates both sections ([`locator`], [`extractor`])
//! - upserts each `(date, value)` series by date into the `Facebook Insights`
//!   and `Instagram Insights` sheets ([`reconciler`])
//!
//! ```
//! use metainsights_core::{create_insights_sheet, run_import, ImportConfig, ImportContext, Metric, Platform};
//! use metainsights_core::ui::testing::RecordingUi;
//! use metainsights_sheet::{Book, Sheet};
//!
//! let mut book = Book::new();
//! let raw = Sheet::from_csv_str(
//!     "Alcance no Facebook\nData,Primary\n2024-01-01,120\n\n\nAlcance do Instagram\nData,Primary\n2024-01-01,80",
//! )
//! .unwrap();
//! book.add_sheet("Alcance", raw).unwrap();
//!
//! let config = ImportConfig::default();
//! let mut ui = RecordingUi::confirming();
//! let mut ctx = ImportContext::new(&mut book, &mut ui, &config);
//! create_insights_sheet(&mut ctx, Platform::Facebook, 2024).unwrap();
//! create_insights_sheet(&mut ctx, Platform::Instagram, 2024).unwrap();
//! let outcome = run_import(&mut ctx, Metric::Reach).unwrap();
//!
//! assert_eq!(outcome.records_written(), 2);
//! assert_eq!(book.get_sheet("Facebook Insights").unwrap().cell(1, 3).as_int(), Some(120));
//! ```

pub mod about;
/// Per-metric sheet names, markers and destination columns.
pub mod config;
pub mod context;
pub mod destination;
/// Error types and result aliases.
pub mod error;
pub mod extractor;
pub mod import;
pub mod locator;
pub mod platform;
pub mod reconciler;
pub mod ui;

pub use about::{about_text, ABOUT_TITLE};
pub use config::{ImportConfig, Metric, MetricConfig};
pub use context::ImportContext;
pub use destination::{create_insights_sheet, CreateOutcome};
pub use error::{InsightsError, InsightsResult};
pub use extractor::{extract_series, MetricRecord, SectionEnd};
pub use import::{load_raw_export, run_import, ImportOutcome, PlatformReport};
pub use locator::{find_marker, find_marker_row, CellPosition};
pub use platform::Platform;
pub use reconciler::{reconcile, ReconcileSummary};
pub use ui::{Confirmation, Ui};
