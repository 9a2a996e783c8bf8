pub mod command_timeout;

pub use command_timeout::run_command_with_timeout;
