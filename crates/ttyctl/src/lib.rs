#![deny(clippy::all)]

mod attrs;
mod error;
mod sys;
mod terminal;

pub use attrs::TermAttrs;
pub use error::TtyError;
pub use terminal::Terminal;
pub use terminal::WindowSize;

pub type Result<T> = std::result::Result<T, TtyError>;
