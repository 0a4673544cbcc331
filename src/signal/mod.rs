pub mod bridge;
pub mod guard;

pub use bridge::{checkpoint, guarded, TERMINATION_SIGNALS};
pub use guard::{SignalGuard, SignalSet};
