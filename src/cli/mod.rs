//! Command-line option dispatch.
//!
//! Options are declared up front with an [`Action`] each. After parsing,
//! initializers run as soon as they are reached in argument order and fill a
//! shared [`Context`]; commands are queued and run afterwards, their exit
//! statuses folded into one aggregate status.

mod action;
mod application;
mod context;
mod dispatcher;
mod registry;
mod types;

#[cfg(test)]
mod tests;

pub use action::{Action, Command, FetchValue, Initializer};
pub use application::CliApplication;
pub use context::Context;
pub use dispatcher::{DispatchOutcome, INPUTS_ID, OptionDispatcher};
pub use registry::CommandTable;
pub use types::{
    CliError, OptionMatch, PARSE_FAILURE_STATUS, ParsedInvocation, VALIDATION_FAILURE_STATUS,
};
