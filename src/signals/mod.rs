//! Rule evaluation interfaces.

pub mod evaluator;

pub use evaluator::RuleEvaluator;
