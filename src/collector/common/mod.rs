// Common utilities for collector passes: command execution, error handling, and field decoders.

pub mod command_executor;
pub mod error_handling;
pub mod parsers;

pub use command_executor::{CommandRunner, SystemCommandRunner};
pub use error_handling::{CollectorError, CollectorResult};
