//! Rubric model and cache.
//!
//! Rubrics are JSON documents with camelCase keys:
//!
//! ```json
//! {
//!   "name": "Presentation",
//!   "rounding": "half_up_0.25",
//!   "criteria": [
//!     {"id": "links", "name": "Hyperlinks", "detectorKey": "hyperlinks", "maxPoints": 1.0,
//!      "levels": [{"code": "A", "name": "Full", "points": 1.0, "description": "..."}]}
//!   ]
//! }
//! ```

mod cache;
mod model;

pub use cache::RubricCache;
pub use model::{sorted_levels, Criterion, Rubric, RubricLevel};
