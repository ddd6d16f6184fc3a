//! Notification rendering

use crate::services::{Notification, NotificationKind, NotificationSink};

/// Format a notification as a single terminal line
pub fn format_notification(notification: &Notification) -> String {
    format!(
        "[{}] {}: {}",
        notification.kind.icon(),
        notification.kind.title(),
        notification.message
    )
}

/// Sink that writes notifications to the terminal as they arrive
///
/// Info goes to stdout; warnings and errors go to stderr.
#[derive(Debug, Default)]
pub struct PrintingSink;

impl NotificationSink for PrintingSink {
    fn notify(&self, notification: Notification) {
        let line = format_notification(&notification);
        match notification.kind {
            NotificationKind::Info => println!("{}", line),
            NotificationKind::Warning | NotificationKind::Error => eprintln!("{}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_notification() {
        let line = format_notification(&Notification::warning(
            "Transaction added. Dining balance: -5.00",
        ));
        assert_eq!(line, "[!] Warning: Transaction added. Dining balance: -5.00");
    }

    #[test]
    fn test_format_info() {
        assert_eq!(
            format_notification(&Notification::info("Transaction added")),
            "[i] Info: Transaction added"
        );
    }
}
