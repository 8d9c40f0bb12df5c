mod pool;
mod session;
mod workflow;

// Public API of the play subsystem.
pub use crate::error::{EmptyPoolError, PlayError};
pub use pool::SessionPool;
pub use session::{PlaySession, PlayState};
pub use workflow::{PlayOutcome, PlayService, TestOutcome};
