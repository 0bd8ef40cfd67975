pub mod clipboard;
pub mod command;

use crate::domain::models::ShareBox;

pub struct ShareManager {}

impl ShareManager {
    /// Platform share when a command is configured, clipboard otherwise.
    pub fn get(share_command: &str) -> ShareBox {
        if share_command.trim().is_empty() {
            return Box::<clipboard::ClipboardShare>::default();
        }

        return Box::new(command::CommandShare::new(share_command));
    }
}
