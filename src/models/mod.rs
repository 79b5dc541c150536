pub mod holding;

pub use holding::{Holding, HoldingReturns};
