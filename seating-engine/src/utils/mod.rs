//! Utility modules

pub mod logger;

pub use logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging for host binaries
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}
