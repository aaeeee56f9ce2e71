use crate::book::Book;
use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Sheet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// CSV reader/writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Whether to use type inference when reading
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
            infer_types: true,
        }
    }
}

impl CsvOptions {
    /// Set whether to infer types
    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }
}

/// Excel-style delimiter hint (`sep=;`) some exporters put on the first line.
fn delimiter_hint(line: &str) -> Option<u8> {
    let rest = line.trim_start_matches('\u{feff}').trim().strip_prefix("sep=")?;
    match rest.as_bytes() {
        [b] => Some(*b),
        _ => None,
    }
}

/// Split CSV text into one slice per record, one per physical line except
/// where a quoted field spans lines. Line terminators (`\n` or `\r\n`) are
/// stripped and empty lines are kept as empty slices.
fn split_records(content: &str, quote: u8) -> Vec<&str> {
    let quote = char::from(quote);
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (idx, c) in content.char_indices() {
        if c == quote {
            in_quotes = !in_quotes;
        } else if c == '\n' && !in_quotes {
            records.push(content[start..idx].trim_end_matches('\r'));
            start = idx + 1;
        }
    }
    if start < content.len() {
        records.push(content[start..].trim_end_matches('\r'));
    }
    records
}

impl Sheet {
    /// Load a sheet from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Load a sheet from a CSV file with custom options
    pub fn from_csv_with_options<P: AsRef<Path>>(path: P, options: CsvOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        Self::from_csv_reader(reader, options)
    }

    /// Load a sheet from a CSV string
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes(), CsvOptions::default())
    }

    /// Load a sheet from a reader.
    ///
    /// Rows may have different lengths and empty lines become empty rows, so
    /// row numbers match what a spreadsheet import would show. A leading
    /// `sep=X` line overrides the delimiter and is not part of the data.
    pub fn from_csv_reader<R: Read>(mut reader: R, options: CsvOptions) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let text = content.strip_prefix('\u{feff}').unwrap_or(&content);

        let mut lines = split_records(text, options.quote);
        let mut delimiter = options.delimiter;
        if let Some(hint) = lines.first().and_then(|first| delimiter_hint(first)) {
            delimiter = hint;
            lines.remove(0);
        }

        let mut data: Vec<Vec<CellValue>> = Vec::with_capacity(lines.len());
        let mut record = csv::StringRecord::new();
        for line in lines {
            // The CSV reader skips empty lines; spreadsheets keep them as blank rows.
            if line.is_empty() {
                data.push(Vec::new());
                continue;
            }
            let mut csv_reader = csv::ReaderBuilder::new()
                .delimiter(delimiter)
                .quote(options.quote)
                .has_headers(false)
                .flexible(true)
                .from_reader(line.as_bytes());
            if !csv_reader.read_record(&mut record)? {
                data.push(Vec::new());
                continue;
            }
            let row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    if options.infer_types {
                        CellValue::parse(field)
                    } else if field.is_empty() {
                        CellValue::Null
                    } else {
                        CellValue::String(field.to_string())
                    }
                })
                .collect();
            data.push(row);
        }

        let mut sheet = Sheet::with_name("Sheet1");
        *sheet.data_mut() = data;
        Ok(sheet)
    }

    /// Save the sheet to a CSV file
    pub fn save_as_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file), &CsvOptions::default())
    }

    /// Write the sheet to a writer as CSV
    pub fn write_csv<W: Write>(&self, writer: W, options: &CsvOptions) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .flexible(true)
            .from_writer(writer);

        for row in self.data() {
            let record: Vec<String> = row.iter().map(CellValue::as_str).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl Book {
    /// Load a book from a directory of CSV files.
    /// Each CSV file becomes a sheet named after the file stem, in file name order.
    pub fn from_csv_dir<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut entries: Vec<_> = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        entries.sort();

        let mut book = Book::new();
        for file_path in entries {
            let is_csv = file_path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            let sheet_name = file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Sheet")
                .to_string();

            let sheet = Sheet::from_csv(&file_path)?;
            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }

    /// Save all sheets to a directory as CSV files
    pub fn save_as_csv_dir<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::create_dir_all(path.as_ref())?;

        for (name, sheet) in self.sheets() {
            let file_path = path.as_ref().join(format!("{name}.csv"));
            sheet.save_as_csv(&file_path)?;
        }

        Ok(())
    }
}
