//! Bot module - Core bot functionality.

pub mod dispatcher;
mod runtime;

pub use runtime::run;
