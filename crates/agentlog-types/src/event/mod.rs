pub mod event;
pub mod kind;
pub mod metadata;

pub use event::*;
pub use kind::*;
pub use metadata::*;
