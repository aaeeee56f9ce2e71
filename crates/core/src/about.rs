/// Title of the about dialog.
pub const ABOUT_TITLE: &str = "Sobre o código";
/// Product name shown in the about dialog.
pub const PRODUCT_NAME: &str = "Meta Insights Importer";

/// Text of the about dialog: product, version and authors.
#[must_use]
pub fn about_text() -> String {
    format!(
        "{PRODUCT_NAME} v{}\n\
         Importa métricas de alcance, visitas e seguidores exportadas do Meta Business Suite \
         para as planilhas de acompanhamento do Facebook e do Instagram.\n\
         Autores: {}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS").replace(':', ", "),
    )
}
