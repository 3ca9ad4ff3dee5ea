pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use config::BoardConfig;
pub use error::TaskboardError;
pub use logging::{LogEntry, Loggable};
pub use result::TaskboardResult;
