#[cfg(test)]
#[path = "notifications_test.rs"]
mod tests;

use crate::domain::models::Notification;
use crate::domain::models::NotificationKind;

/// Single slot toast. Showing a notification replaces the current one, and an
/// expiry only clears the notification it was scheduled for.
#[derive(Default)]
pub struct NotificationService {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationService {
    pub fn show(&mut self, kind: NotificationKind, message: &str) -> u64 {
        self.next_id += 1;
        tracing::debug!(id = self.next_id, kind = %kind, text = message, "Notification shown");
        self.current = Some(Notification {
            id: self.next_id,
            kind,
            message: message.to_string(),
        });

        return self.next_id;
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn expire(&mut self, id: u64) -> bool {
        if let Some(notification) = &self.current {
            if notification.id == id {
                self.current = None;
                return true;
            }
        }

        return false;
    }

    pub fn current(&self) -> Option<&Notification> {
        return self.current.as_ref();
    }
}
