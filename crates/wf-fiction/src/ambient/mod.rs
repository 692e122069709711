//! Rate-limited ambient narration.
//!
//! Every `ambient_interval` seconds the scheduler scans the content's
//! ambient events in declaration order and fires the first eligible one.

mod event;
mod scheduler;

pub use event::AmbientEvent;
pub use scheduler::AmbientScheduler;
