//! Story data for Teller: the catalog of branching stories and the graph of
//! pages inside each one.
//!
//! Stories are authored as YAML or JSON documents, validated once when the
//! [`Catalog`] is loaded, and treated as immutable afterwards. A validated
//! [`Story`] guarantees that it has a `start` page, that every option points
//! at a page in the same story, and that every page is either a branch or an
//! ending.

/// The immutable set of all loaded stories.
pub mod catalog;
/// Story documents as written by authors.
pub mod document;
/// Error types used throughout the crate.
pub mod error;
/// Stories, pages, options and endings.
pub mod story;

/// Re-export the catalog.
pub use catalog::Catalog;
/// Re-export document types.
pub use document::{DocumentFormat, PageRecord, StoryDocument};
/// Re-export error types.
pub use error::{LoadError, LoadResult, StoryError, StoryResult, ValidationProblem};
/// Re-export story graph types.
pub use story::{Choice, Ending, Page, PageBody, START_PAGE, Story};
