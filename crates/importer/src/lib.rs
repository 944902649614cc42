pub mod error;
pub mod seed;
pub mod sources;
pub mod traits;
pub mod validator;

pub use error::{ImporterError, Result};
pub use seed::{SeedReport, seed};
pub use sources::{HttpSource, JsonFileSource, StaticSource, source_from_location};
pub use traits::CandidateSource;
pub use validator::{DirectoryValidator, ValidationReport};
