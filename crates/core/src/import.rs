//! The import command: confirm, verify, extract, reconcile.

use crate::config::{ImportConfig, Metric};
use crate::context::ImportContext;
use crate::error::{InsightsError, InsightsResult};
use crate::extractor::{extract_series, MetricRecord, SectionEnd};
use crate::platform::Platform;
use crate::reconciler::{reconcile, ReconcileSummary};
use crate::ui::Ui;
use metainsights_sheet::{Book, Sheet};
use std::path::Path;
use tracing::{info, warn};

/// What one platform received during an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformReport {
    pub platform: Platform,
    pub summary: ReconcileSummary,
}

/// How an import run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The user declined the confirmation; nothing was read or written.
    Cancelled,
    /// The run completed. `platforms` lists every platform whose marker was
    /// found, in Facebook then Instagram order.
    Done {
        source_missing: bool,
        platforms: Vec<PlatformReport>,
    },
}

impl ImportOutcome {
    /// Total records written across platforms.
    #[must_use]
    pub fn records_written(&self) -> usize {
        match self {
            ImportOutcome::Cancelled => 0,
            ImportOutcome::Done { platforms, .. } => platforms
                .iter()
                .map(|p| p.summary.updated + p.summary.appended)
                .sum(),
        }
    }
}

/// Run the import of `metric` against the context's workbook.
pub fn run_import<U: Ui + ?Sized>(
    ctx: &mut ImportContext<'_, U>,
    metric: Metric,
) -> InsightsResult<ImportOutcome> {
    let config = ctx.config;
    let config = config.metric(metric);
    let dest_column = config.dest_column_index()?;

    if !ctx
        .ui
        .confirm(&config.dialog_title(), &config.dialog_message())
        .is_ok()
    {
        ctx.ui.alert("Ação cancelada", "Nada foi feito.");
        info!(%metric, "import cancelled");
        return Ok(ImportOutcome::Cancelled);
    }

    let source = ctx.book.sheet(&config.source_sheet);
    let source_missing = source.is_none();
    if source_missing {
        warn!(%metric, sheet = %config.source_sheet, "raw import sheet not found");
        ctx.ui
            .alert("⚠️ Planilha não encontrada", &config.missing_source_message());
    }

    let facebook = extract_platform(
        &mut *ctx.ui,
        source,
        &config.facebook_marker,
        SectionEnd::NextMarker(&config.instagram_marker),
    )?;
    let instagram = extract_platform(&mut *ctx.ui, source, &config.instagram_marker, SectionEnd::LastValue)?;

    let mut platforms = Vec::new();
    for (platform, records) in [(Platform::Facebook, facebook), (Platform::Instagram, instagram)] {
        let Some(records) = records else {
            continue;
        };
        let summary = write_platform(ctx, platform, dest_column, &records)?;
        platforms.push(PlatformReport { platform, summary });
    }

    info!(%metric, source_missing, platforms = platforms.len(), "import finished");
    Ok(ImportOutcome::Done {
        source_missing,
        platforms,
    })
}

fn extract_platform<U: Ui + ?Sized>(
    ui: &mut U,
    source: Option<&Sheet>,
    marker: &str,
    end: SectionEnd<'_>,
) -> InsightsResult<Option<Vec<MetricRecord>>> {
    let Some(sheet) = source else {
        return Ok(None);
    };
    let records = extract_series(sheet, marker, end)?;
    match &records {
        Some(_) => ui.toast(&format!("Importando dados de {marker}.")),
        None => warn!(sheet = sheet.name(), marker, "marker not found"),
    }
    Ok(records)
}

fn write_platform<U: Ui + ?Sized>(
    ctx: &mut ImportContext<'_, U>,
    platform: Platform,
    dest_column: usize,
    records: &[MetricRecord],
) -> InsightsResult<ReconcileSummary> {
    let name = platform.insights_sheet_name();
    let Some(dest) = ctx.book.sheet_mut(name) else {
        return Err(InsightsError::DestinationMissing {
            name: name.to_string(),
        });
    };

    ctx.ui.toast(&format!(
        "Inserindo dados do {platform}... Aguarde a confirmação de conclusão."
    ));
    let summary = reconcile(dest, dest_column, records);
    ctx.ui
        .toast(&format!("Informações do {platform} inseridas com sucesso."));
    Ok(summary)
}

/// Load a raw Meta export into `book` under `metric`'s source sheet name,
/// replacing any sheet already there.
///
/// `.xlsx` files contribute their first worksheet; anything else is read as
/// CSV (a leading `sep=` hint is honoured).
pub fn load_raw_export(
    book: &mut Book,
    config: &ImportConfig,
    metric: Metric,
    path: &Path,
) -> InsightsResult<()> {
    let source_sheet = &config.metric(metric).source_sheet;
    let is_xlsx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));

    let sheet = if is_xlsx {
        Sheet::from_xlsx(path)?
    } else {
        Sheet::from_csv(path)?
    };

    let rows = sheet.row_count();
    if book.replace_sheet(source_sheet, sheet).is_some() {
        info!(sheet = %source_sheet, rows, "raw import sheet replaced");
    } else {
        info!(sheet = %source_sheet, rows, "raw import sheet added");
    }
    Ok(())
}
