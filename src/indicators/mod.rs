pub mod calculator;
pub mod trend;
pub mod valuation;

pub use calculator::*;
pub use trend::*;
pub use valuation::*;
