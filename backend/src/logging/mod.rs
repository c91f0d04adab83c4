//! Six-level logging over `tracing`.
//!
//! Severities run `fatal > error > warning > info > http > debug`. A
//! [`Logger`] writes each record synchronously to a persistent JSON sink,
//! which admits only `fatal` and `error`, and to an interactive console
//! sink whose threshold depends on the run [`Mode`].

mod format;
mod logger;
mod panic_hook;
mod severity;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use format::{ConsoleFormat, JsonRecordFormat};
pub use logger::{LOG_TARGET, Logger, LoggerBuilder};
pub use panic_hook::install_panic_hook;
pub use severity::{Mode, Severity};
