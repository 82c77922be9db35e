//! Output generation for the feed.
//!
//! # Submodules
//!
//! - [`text`]: Renders the feed and error views as plain text for the terminal
//! - [`json`]: Writes the latest successful feed to a JSON file
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── latest.json   # replaced after every successful cycle
//! ```

pub mod json;
pub mod text;
