pub mod domain;

pub use domain::{EngineError, Reject};
