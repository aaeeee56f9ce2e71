use crate::config::ImportConfig;
use crate::ui::Ui;
use metainsights_sheet::Book;

/// Everything one command invocation works against: the workbook holding
/// the raw and tracking sheets, the user interface and the import table.
///
/// Built once per invocation and passed explicitly to every operation.
pub struct ImportContext<'a, U: Ui + ?Sized> {
    pub book: &'a mut Book,
    pub ui: &'a mut U,
    pub config: &'a ImportConfig,
}

impl<'a, U: Ui + ?Sized> ImportContext<'a, U> {
    pub fn new(book: &'a mut Book, ui: &'a mut U, config: &'a ImportConfig) -> Self {
        ImportContext { book, ui, config }
    }
}
