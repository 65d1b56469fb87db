pub mod src;

pub use src::console_logger::ConsoleLogger;
pub use src::logger::{BufferedLogger, LogLevel, Logger, NullLogger};
