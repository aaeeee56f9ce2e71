use chrono::{NaiveDate, NaiveDateTime};
use metainsights_core::ui::testing::RecordingUi;
use metainsights_core::{
    create_insights_sheet, extract_series, find_marker_row, load_raw_export, run_import,
    CellPosition, ImportConfig, ImportContext, ImportOutcome, InsightsError, Metric, Platform,
    PlatformReport, ReconcileSummary, SectionEnd,
};
use metainsights_sheet::{Book, CellValue, Sheet};
use tempfile::tempdir;

const REACH: usize = 3;
const LIKES: usize = 4;
const FOLLOWERS: usize = 5;

fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Raw reach sheet: Facebook marker at row 5, data rows 7-10, Instagram
/// marker at row 13 with two data rows.
fn reach_export() -> Sheet {
    let mut sheet = Sheet::new();
    sheet.set(0, 0, "Exportado do Meta Business Suite");
    sheet.set(4, 0, "Alcance no Facebook");
    sheet.set(5, 0, "Data");
    sheet.set(5, 1, "Primary");
    for (i, value) in ["120", "130", "140", "150"].iter().enumerate() {
        sheet.set(6 + i, 0, day(i as u32 + 1));
        sheet.set(6 + i, 1, *value);
    }
    sheet.set(12, 0, "Alcance do Instagram");
    sheet.set(13, 0, "Data");
    sheet.set(13, 1, "Primary");
    sheet.set(14, 0, day(1));
    sheet.set(14, 1, "80");
    sheet.set(15, 0, day(2));
    sheet.set(15, 1, "85");
    sheet
}

/// Tracking sheet with only the header row.
fn empty_tracking_sheet() -> Sheet {
    Sheet::from_data(vec![vec![
        "Nº do Mês",
        "Mês",
        "Data",
        "Alcance",
        "Curtidas",
        "Seguidores",
    ]])
}

fn book_with(source: &str, raw: Sheet) -> Book {
    let mut book = Book::new();
    book.add_sheet(source, raw).unwrap();
    book.add_sheet("Facebook Insights", empty_tracking_sheet())
        .unwrap();
    book.add_sheet("Instagram Insights", empty_tracking_sheet())
        .unwrap();
    book
}

fn import(book: &mut Book, ui: &mut RecordingUi, metric: Metric) -> ImportOutcome {
    let config = ImportConfig::default();
    let mut ctx = ImportContext::new(book, ui, &config);
    run_import(&mut ctx, metric).unwrap()
}

// ===== Full imports =====

#[test]
fn test_reach_import_into_empty_tracking_sheets() {
    let mut book = book_with("Alcance", reach_export());
    let mut ui = RecordingUi::confirming();

    let outcome = import(&mut book, &mut ui, Metric::Reach);

    assert_eq!(
        outcome,
        ImportOutcome::Done {
            source_missing: false,
            platforms: vec![
                PlatformReport {
                    platform: Platform::Facebook,
                    summary: ReconcileSummary { updated: 0, appended: 4 },
                },
                PlatformReport {
                    platform: Platform::Instagram,
                    summary: ReconcileSummary { updated: 0, appended: 2 },
                },
            ],
        }
    );

    let facebook = book.get_sheet("Facebook Insights").unwrap();
    assert_eq!(facebook.row_count(), 5);
    for (i, value) in ["120", "130", "140", "150"].iter().enumerate() {
        assert_eq!(facebook.cell(1 + i, 2).as_datetime(), Some(day(i as u32 + 1)));
        assert_eq!(facebook.cell(1 + i, REACH), &CellValue::from(*value));
        assert!(facebook.cell(1 + i, LIKES).is_blank());
    }

    let instagram = book.get_sheet("Instagram Insights").unwrap();
    assert_eq!(instagram.row_count(), 3);
    assert_eq!(instagram.cell(2, REACH), &CellValue::from("85"));

    assert_eq!(ui.confirmations, vec!["Importar Alcance".to_string()]);
    assert_eq!(
        ui.toasts,
        vec![
            "Importando dados de Alcance no Facebook.",
            "Importando dados de Alcance do Instagram.",
            "Inserindo dados do Facebook... Aguarde a confirmação de conclusão.",
            "Informações do Facebook inseridas com sucesso.",
            "Inserindo dados do Instagram... Aguarde a confirmação de conclusão.",
            "Informações do Instagram inseridas com sucesso.",
        ]
    );
    assert!(ui.alerts.is_empty());
}

#[test]
fn test_import_updates_created_year_sheet() {
    let mut raw = Sheet::new();
    raw.set(0, 0, "Seguidores");
    raw.set(2, 0, day(3));
    raw.set(2, 1, 4);
    raw.set(5, 0, "Seguidos no Instagram");
    raw.set(7, 0, day(3));
    raw.set(7, 1, 9);

    let mut book = Book::new();
    book.add_sheet("Seguidores", raw).unwrap();
    let config = ImportConfig::default();
    let mut ui = RecordingUi::confirming();
    let mut ctx = ImportContext::new(&mut book, &mut ui, &config);
    create_insights_sheet(&mut ctx, Platform::Facebook, 2024).unwrap();
    create_insights_sheet(&mut ctx, Platform::Instagram, 2024).unwrap();

    let outcome = run_import(&mut ctx, Metric::Followers).unwrap();
    assert_eq!(outcome.records_written(), 2);

    let facebook = book.get_sheet("Facebook Insights").unwrap();
    assert_eq!(facebook.row_count(), 367);
    assert_eq!(facebook.cell(3, FOLLOWERS), &CellValue::Int(4));
    assert_eq!(
        book.get_sheet("Instagram Insights").unwrap().cell(3, FOLLOWERS),
        &CellValue::Int(9)
    );
}

#[test]
fn test_metrics_share_rows() {
    let mut book = book_with("Alcance", reach_export());
    let mut visits = Sheet::new();
    visits.set(0, 0, "Visitas ao Facebook");
    visits.set(2, 0, day(2));
    visits.set(2, 1, 33);
    visits.set(3, 0, day(8));
    visits.set(3, 1, 34);
    book.add_sheet("Visitas", visits).unwrap();
    let mut ui = RecordingUi::confirming();

    import(&mut book, &mut ui, Metric::Reach);
    let outcome = import(&mut book, &mut ui, Metric::Likes);

    assert_eq!(
        outcome,
        ImportOutcome::Done {
            source_missing: false,
            platforms: vec![PlatformReport {
                platform: Platform::Facebook,
                summary: ReconcileSummary { updated: 1, appended: 1 },
            }],
        }
    );
    let facebook = book.get_sheet("Facebook Insights").unwrap();
    assert_eq!(facebook.cell(2, REACH), &CellValue::from("130"));
    assert_eq!(facebook.cell(2, LIKES), &CellValue::Int(33));
    assert_eq!(facebook.cell(5, 2).as_datetime(), Some(day(8)));
    assert!(facebook.cell(5, REACH).is_blank());
}

#[test]
fn test_reimport_is_idempotent() {
    let mut book = book_with("Alcance", reach_export());
    let mut ui = RecordingUi::confirming();

    import(&mut book, &mut ui, Metric::Reach);
    let after_first = book.get_sheet("Facebook Insights").unwrap().clone();
    let outcome = import(&mut book, &mut ui, Metric::Reach);

    assert_eq!(book.get_sheet("Facebook Insights").unwrap(), &after_first);
    assert_eq!(outcome.records_written(), 6);
}

// ===== Skipped and aborted runs =====

#[test]
fn test_missing_instagram_marker_skips_platform() {
    let mut raw = reach_export();
    raw.data_mut().truncate(12);
    let mut book = book_with("Alcance", raw);
    let mut ui = RecordingUi::confirming();

    let outcome = import(&mut book, &mut ui, Metric::Reach);

    let ImportOutcome::Done { platforms, .. } = outcome else {
        panic!("expected a finished import");
    };
    assert_eq!(platforms.len(), 1);
    assert_eq!(platforms[0].platform, Platform::Facebook);
    assert_eq!(book.get_sheet("Instagram Insights").unwrap().row_count(), 1);
    assert!(ui.toasts.iter().all(|t| !t.contains("Instagram")));
}

#[test]
fn test_cancel_writes_nothing() {
    let mut book = book_with("Alcance", reach_export());
    let mut ui = RecordingUi::cancelling();

    let outcome = import(&mut book, &mut ui, Metric::Reach);

    assert_eq!(outcome, ImportOutcome::Cancelled);
    assert_eq!(outcome.records_written(), 0);
    assert_eq!(book.get_sheet("Facebook Insights").unwrap().row_count(), 1);
    assert_eq!(
        ui.alerts,
        vec![("Ação cancelada".to_string(), "Nada foi feito.".to_string())]
    );
    assert!(ui.toasts.is_empty());
}

#[test]
fn test_missing_source_sheet_alerts_and_continues() {
    let mut book = book_with("Alcance", reach_export());
    let mut ui = RecordingUi::confirming();

    let outcome = import(&mut book, &mut ui, Metric::Followers);

    assert_eq!(
        outcome,
        ImportOutcome::Done {
            source_missing: true,
            platforms: Vec::new(),
        }
    );
    assert_eq!(ui.alerts.len(), 1);
    assert_eq!(ui.alerts[0].0, "⚠️ Planilha não encontrada");
    assert!(ui.alerts[0].1.contains("\"Seguidores\""));
    assert!(ui.toasts.is_empty());
}

#[test]
fn test_missing_destination_sheet_fails() {
    let mut book = Book::new();
    book.add_sheet("Alcance", reach_export()).unwrap();
    book.add_sheet("Facebook Insights", empty_tracking_sheet())
        .unwrap();
    let config = ImportConfig::default();
    let mut ui = RecordingUi::confirming();
    let mut ctx = ImportContext::new(&mut book, &mut ui, &config);

    let result = run_import(&mut ctx, Metric::Reach);

    assert!(matches!(
        result,
        Err(InsightsError::DestinationMissing { ref name }) if name == "Instagram Insights"
    ));
    // Facebook was written before the failure
    assert_eq!(book.get_sheet("Facebook Insights").unwrap().row_count(), 5);
}

#[test]
fn test_config_overrides_markers_and_column() {
    let mut raw = Sheet::new();
    raw.set(0, 0, "Reach on Facebook");
    raw.set(2, 0, day(1));
    raw.set(2, 1, 5);
    let mut book = book_with("Reach", raw);

    let config = ImportConfig::from_yaml_str(
        "reach:\n  source_sheet: Reach\n  facebook_marker: Reach on Facebook\n  dest_column: F\n",
    )
    .unwrap();
    let mut ui = RecordingUi::confirming();
    let mut ctx = ImportContext::new(&mut book, &mut ui, &config);
    run_import(&mut ctx, Metric::Reach).unwrap();

    let facebook = book.get_sheet("Facebook Insights").unwrap();
    assert_eq!(facebook.cell(1, FOLLOWERS), &CellValue::Int(5));
    assert!(facebook.cell(1, REACH).is_blank());
}

// ===== Files =====

#[test]
fn test_csv_export_to_xlsx_book() {
    let dir = tempdir().unwrap();
    let raw_path = dir.path().join("alcance.csv");
    std::fs::write(
        &raw_path,
        "sep=,\n\
         \"Alcance no Facebook\"\n\
         \"Data\",\"Primary\"\n\
         \"2024-01-01T00:00:00\",\"120\"\n\
         \"2024-01-02T00:00:00\",\"130\"\n\
         \n\
         \n\
         \"Alcance do Instagram\"\n\
         \"Data\",\"Primary\"\n\
         \"2024-01-02T00:00:00\",\"80\"\n",
    )
    .unwrap();
    let book_path = dir.path().join("insights.xlsx");

    let config = ImportConfig::default();
    let mut book = Book::new();
    let mut ui = RecordingUi::confirming();
    load_raw_export(&mut book, &config, Metric::Reach, &raw_path).unwrap();
    let mut ctx = ImportContext::new(&mut book, &mut ui, &config);
    create_insights_sheet(&mut ctx, Platform::Facebook, 2024).unwrap();
    create_insights_sheet(&mut ctx, Platform::Instagram, 2024).unwrap();
    run_import(&mut ctx, Metric::Reach).unwrap();
    book.save(&book_path).unwrap();

    let loaded = Book::load(&book_path).unwrap();
    let facebook = loaded.get_sheet("Facebook Insights").unwrap();
    assert_eq!(facebook.cell(1, 2).as_datetime(), Some(day(1)));
    assert_eq!(facebook.cell(1, REACH).as_int(), Some(120));
    assert_eq!(facebook.cell(2, REACH).as_int(), Some(130));
    assert_eq!(facebook.cell(1, 0), &CellValue::formula("=MONTH(C2)"));
    let instagram = loaded.get_sheet("Instagram Insights").unwrap();
    assert!(instagram.cell(1, REACH).is_blank());
    assert_eq!(instagram.cell(2, REACH).as_int(), Some(80));
}

/// The reach export of `reach_export` as a CSV upload, with the given line ending.
fn reach_export_csv(eol: &str) -> String {
    [
        "Exportado do Meta Business Suite",
        "",
        "",
        "",
        "Alcance no Facebook",
        "Data,Primary",
        "2024-01-01T00:00:00,\"120\"",
        "2024-01-02T00:00:00,\"130\"",
        "2024-01-03T00:00:00,\"140\"",
        "2024-01-04T00:00:00,\"150\"",
        "",
        "",
        "Alcance do Instagram",
        "Data,Primary",
        "2024-01-01T00:00:00,\"80\"",
    ]
    .join(eol)
}

#[test]
fn test_csv_upload_keeps_section_rows() {
    for eol in ["\n", "\r\n"] {
        let dir = tempdir().unwrap();
        let raw_path = dir.path().join("alcance.csv");
        std::fs::write(&raw_path, reach_export_csv(eol)).unwrap();

        let config = ImportConfig::default();
        let mut book = Book::new();
        load_raw_export(&mut book, &config, Metric::Reach, &raw_path).unwrap();
        let raw = book.get_sheet("Alcance").unwrap();

        assert_eq!(
            find_marker_row(raw, "A:A", "Alcance no Facebook").unwrap(),
            Some(5),
            "{eol:?}"
        );
        assert_eq!(
            find_marker_row(raw, "A:A", "Alcance do Instagram").unwrap(),
            Some(13),
            "{eol:?}"
        );

        let facebook = extract_series(
            raw,
            "Alcance no Facebook",
            SectionEnd::NextMarker("Alcance do Instagram"),
        )
        .unwrap()
        .unwrap();
        let pairs: Vec<_> = facebook
            .iter()
            .map(|record| (record.date, record.value.as_int()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (day(1), Some(120)),
                (day(2), Some(130)),
                (day(3), Some(140)),
                (day(4), Some(150)),
            ],
            "{eol:?}"
        );
    }
}

#[test]
fn test_raw_export_replaces_previous_upload() {
    let dir = tempdir().unwrap();
    let raw_path = dir.path().join("seguidores.csv");
    std::fs::write(&raw_path, "Seguidores\nData,Primary\n2024-01-05,3\n").unwrap();

    let config = ImportConfig::default();
    let mut book = Book::new();
    book.add_sheet("Seguidores", Sheet::from_data(vec![vec!["velho"]]))
        .unwrap();
    load_raw_export(&mut book, &config, Metric::Followers, &raw_path).unwrap();

    let raw = book.get_sheet("Seguidores").unwrap();
    assert_eq!(raw.name(), "Seguidores");
    assert_eq!(
        metainsights_core::find_marker(raw, "Seguidores"),
        Some(CellPosition { row: 1, column: 1 })
    );
    assert_eq!(raw.cell(2, 0).as_datetime(), Some(day(5)));
}
