pub mod agent;
pub mod content;
pub mod error;
pub mod event;
pub mod session;

pub use agent::AgentKind;
pub use content::{ContentBlock, block_type};
pub use error::{Error, Result};
pub use event::*;
pub use session::*;
