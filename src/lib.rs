pub mod cli;
pub mod models;
pub mod query_detect;

pub use models::{LineColumn, QueryInfo};
pub use query_detect::{
    extract_all_queries, find_current_query_in_text, find_query_boundaries, get_line_and_column,
    is_valid_query, line_column_to_offset,
};

/// Reusable entrypoint so other launchers can run the CLI.
pub fn run() -> Result<(), cli::CliError> {
    dotenv::dotenv().ok();
    let _ = env_logger::Builder::from_default_env()
        // Enable info-level logs for our crate so users can see resolver messages
        .filter_module("querydetect", log::LevelFilter::Info)
        .is_test(false)
        .try_init();
    cli::run()
}

// ----------------- FFI -----------------
// Exported C ABI helper so editor hosts embedding the cdylib can query the version.
use std::os::raw::c_char;

#[unsafe(no_mangle)]
pub extern "C" fn querydetect_version() -> *const c_char {
    // Compile-time string; ends with NUL for C.
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
