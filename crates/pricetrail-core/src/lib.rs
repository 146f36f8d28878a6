pub mod classify;
pub mod commands;
pub mod contracts;
pub mod dates;
pub mod error;
mod extract;
mod filter;
mod history;
pub mod prune;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{CoreError, CoreResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
