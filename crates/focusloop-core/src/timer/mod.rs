mod engine;
mod session;

pub use engine::{TimerEngine, TimerSnapshot};
pub use session::{Phase, Session};
