//! Git repository access and the metadata the checks read from it.

pub mod metadata;
pub mod repository;

pub use metadata::{CommitField, GitMetadata, MetadataProvider};
pub use repository::GitRepository;
