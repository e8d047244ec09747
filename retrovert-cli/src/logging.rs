// retrovert-cli/src/logging.rs
//
// Logging-related helpers. The logging backend itself is env_logger,
// initialized in main.rs and driven by RUST_LOG (warn by default; set
// RUST_LOG=debug to see every external command invocation).

/// Returns the current local timestamp formatted for run banners.
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
