pub mod dispatcher;

pub use dispatcher::{AlertDispatcher, DispatchOutcome, LocalSink, StdoutSink};
