//! Core application primitives (runner, run cycle, scheduler)

pub mod cycle;
pub mod runtime;
pub mod scheduler;

pub use cycle::*;
pub use runtime::*;
pub use scheduler::*;
