//! Terminal front end for import dialogs.

use colored::Colorize;
use metainsights_core::{Confirmation, Ui};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

/// Prints dialogs to stdout and reads confirmations from the terminal.
///
/// With `assume_yes` every confirmation is answered OK without prompting.
pub struct TerminalUi {
    editor: Option<DefaultEditor>,
    assume_yes: bool,
}

impl TerminalUi {
    pub fn new(assume_yes: bool) -> Self {
        TerminalUi {
            editor: None,
            assume_yes,
        }
    }

    fn read_answer(&mut self) -> Confirmation {
        if self.editor.is_none() {
            match DefaultEditor::new() {
                Ok(editor) => self.editor = Some(editor),
                Err(e) => {
                    warn!("cannot open terminal for confirmation: {e}");
                    return Confirmation::Cancel;
                }
            }
        }
        let Some(editor) = self.editor.as_mut() else {
            return Confirmation::Cancel;
        };

        let prompt = "[OK/Cancelar] > ".green().bold().to_string();
        match editor.readline(&prompt) {
            Ok(line) => parse_answer(&line),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Confirmation::Cancel,
            Err(e) => {
                warn!("confirmation prompt failed: {e}");
                Confirmation::Cancel
            }
        }
    }
}

impl Ui for TerminalUi {
    fn confirm(&mut self, title: &str, message: &str) -> Confirmation {
        println!("{}", title.cyan().bold());
        println!("{message}");
        if self.assume_yes {
            println!("{}", "OK (--yes)".dimmed());
            return Confirmation::Ok;
        }
        self.read_answer()
    }

    fn alert(&mut self, title: &str, message: &str) {
        println!("{}", title.yellow().bold());
        println!("{message}");
    }

    fn toast(&mut self, message: &str) {
        println!("{} {message}", "»".green());
    }
}

/// Only an explicit OK (or yes/sim) confirms.
fn parse_answer(line: &str) -> Confirmation {
    match line.trim().to_lowercase().as_str() {
        "ok" | "o" | "y" | "yes" | "s" | "sim" => Confirmation::Ok,
        _ => Confirmation::Cancel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("OK"), Confirmation::Ok);
        assert_eq!(parse_answer(" sim "), Confirmation::Ok);
        assert_eq!(parse_answer("y"), Confirmation::Ok);
        assert_eq!(parse_answer(""), Confirmation::Cancel);
        assert_eq!(parse_answer("cancelar"), Confirmation::Cancel);
        assert_eq!(parse_answer("talvez"), Confirmation::Cancel);
    }

    #[test]
    fn test_assume_yes_never_prompts() {
        let mut ui = TerminalUi::new(true);
        assert!(ui.confirm("Importar Alcance", "...").is_ok());
        assert!(ui.editor.is_none());
    }
}
