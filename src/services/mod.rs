pub mod help;
pub mod packages;

pub use help::{HelpEntry, generate_help_response, help_entries};
pub use packages::{
    AurClient, OfficialClient, PackageBackend, PackageResult, PackageSource, SourceError,
    SourceKind, SourceResult,
};
