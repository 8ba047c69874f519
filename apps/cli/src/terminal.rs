//! A list "screen" rendered to standard output.

use std::io::{self, Write};
use std::sync::Mutex;

use iacc_core::listing::{ItemNavigator, ListPresenter, PrimaryAction};
use iacc_core::{Error, ItemViewModel, ListItem, ListKind};

/// Prints rows and errors, and logs navigation requests.
pub struct TerminalScreen {
    kind: ListKind,
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalScreen {
    pub fn new(kind: ListKind) -> Self {
        Self::with_writer(kind, Box::new(io::stdout()))
    }

    pub fn with_writer(kind: ListKind, out: Box<dyn Write + Send>) -> Self {
        Self {
            kind,
            out: Mutex::new(out),
        }
    }

    /// Prints the title bar with the screen's primary action.
    pub fn print_header(&self) {
        let action = self.kind.primary_action();
        self.write_lines(&[
            format!("== {} ==  [{}]", self.kind.title(), action.label()),
        ]);
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for line in lines {
            if let Err(e) = writeln!(out, "{}", line) {
                tracing::warn!("Failed to write to terminal: {}", e);
                return;
            }
        }
        let _ = out.flush();
    }
}

impl ListPresenter for TerminalScreen {
    fn present(&self, items: &[ItemViewModel]) {
        if items.is_empty() {
            self.write_lines(&["  (no items)".to_string()]);
            return;
        }

        let lines: Vec<String> = items
            .iter()
            .enumerate()
            .flat_map(|(index, row)| {
                [
                    format!("{:>3}. {}", index, row.title()),
                    format!("     {}", row.subtitle()),
                ]
            })
            .collect();
        self.write_lines(&lines);
    }

    fn present_error(&self, error: &Error) {
        self.write_lines(&[format!("  Error: {}", error)]);
    }

    fn set_refreshing(&self, refreshing: bool) {
        if refreshing {
            self.write_lines(&["  Refreshing...".to_string()]);
        }
    }
}

impl ItemNavigator for TerminalScreen {
    fn show_details(&self, item: &ListItem) {
        tracing::info!(entity = %item.kind(), "Opening details");
        let detail = match item {
            ListItem::Card(card) => format!("Card {} ({})", card.number, card.holder),
            ListItem::Friend(friend) => format!("Friend {} ({})", friend.name, friend.phone),
            ListItem::Transfer(transfer) => format!(
                "Transfer {} {} from {} to {}",
                transfer.amount, transfer.currency_code, transfer.sender, transfer.recipient
            ),
        };
        self.write_lines(&[format!("  -> {}", detail)]);
    }

    fn open(&self, action: PrimaryAction) {
        tracing::info!(?action, "Opening flow");
        self.write_lines(&[format!("  -> {:?}", action)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iacc_core::listing::SelectAction;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_prints_header_and_rows() {
        let buffer = SharedBuffer::default();
        let screen = TerminalScreen::with_writer(ListKind::SentTransfers, Box::new(buffer.clone()));

        screen.print_header();
        screen.present(&[ItemViewModel::new("$5.00 • Lunch", "Sent to: Bo on ...", SelectAction::noop())]);

        assert_eq!(
            buffer.contents(),
            "== Sent ==  [Send]\n  0. $5.00 • Lunch\n     Sent to: Bo on ...\n"
        );
    }

    #[test]
    fn test_prints_errors() {
        let buffer = SharedBuffer::default();
        let screen = TerminalScreen::with_writer(ListKind::Cards, Box::new(buffer.clone()));

        screen.present_error(&Error::fetch(ListKind::Cards, "offline"));

        assert_eq!(buffer.contents(), "  Error: Failed to load Cards: offline\n");
    }
}
