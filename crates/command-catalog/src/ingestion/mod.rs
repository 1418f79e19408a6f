//! Command guide ingestion: frontmatter parsing, validation and persistence

pub mod frontmatter;
mod policy;
mod processor;
mod seed;
mod source;

pub use frontmatter::{parse, Frontmatter, REQUIRED_FIELDS};
pub use policy::CategoryPolicy;
pub use processor::{IngestListener, IngestOutcome, IngestPipeline, DEFAULT_EXTENSIONS};
pub use seed::{seed_from_dir, SeedReport};
pub use source::{DocumentSource, RawDocument};
