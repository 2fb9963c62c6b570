//! Output rendering for grades, feature sets and batch reports.
//!
//! Everything the library produces is serializable; this module fixes the
//! JSON shape consumers see (camelCase keys on results and reports).
//!
//! # Example
//!
//! ```no_run
//! use docgrade::render::{to_json, JsonFormat};
//!
//! fn main() -> docgrade::Result<()> {
//!     let result = docgrade::grade_file("deck.pptx")?;
//!     println!("{}", to_json(&result, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```

mod json;

pub use json::{to_json, to_json_value, JsonFormat};
