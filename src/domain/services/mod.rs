pub mod actions;
mod app_state;
pub mod clipboard;
pub mod events;
pub mod export;
pub mod html;
mod notifications;
pub mod results_screen;
mod scroll;
pub mod text_render;
pub mod timers;
pub mod wizard_screen;

pub use app_state::*;
pub use notifications::*;
pub use scroll::*;
