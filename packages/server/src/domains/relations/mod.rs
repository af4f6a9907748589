//! Relation resolution for content and content collections.
//!
//! Request flow: `queries` composes the traversals for one identifier,
//! `executor` runs them as one read unit, `aggregate` folds the ordered
//! result sets into response shapes, and `identity` turns UUIDs into the
//! public URLs those shapes expose. `resolver` wires the four together.

pub mod aggregate;
pub mod error;
pub mod executor;
pub mod identity;
pub mod models;
pub mod queries;
pub mod resolver;

pub use error::RelationsError;
pub use executor::{BatchReadExecutor, BatchResults};
pub use identity::IdentityMapper;
pub use models::{CollectionRelations, ContentRelations, RelatedContent, Resolved};
pub use resolver::RelationsResolver;
