//! Data types shared by the windowing and focus engines.

mod focus;
mod rect;
mod span;
mod window;

pub use focus::*;
pub use rect::*;
pub use span::*;
pub use window::*;
