mod action;
mod analysis;
mod backend;
mod event;
mod loading;
mod notification;
mod resume_file;
mod session;
mod share;
mod textarea;
mod validation;
mod view;
mod wizard_step;

pub use action::*;
pub use analysis::*;
pub use backend::*;
pub use event::*;
pub use loading::*;
pub use notification::*;
pub use resume_file::*;
pub use session::*;
pub use share::*;
pub use textarea::*;
pub use validation::*;
pub use view::*;
pub use wizard_step::*;
