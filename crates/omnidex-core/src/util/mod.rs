//! Text utilities shared by the writer, the query planner, and the stores.
//!
//! # Modules
//!
//! - [`markup`]: Markup stripping for stored titles and descriptions
//! - [`terms`]: Term splitting used for both indexed text and queries

pub mod markup;
pub mod terms;

mod proptests;
