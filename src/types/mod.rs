pub mod errors;
pub mod probe;
pub mod progress;

pub use errors::{ImportError, ImportResult};
pub use probe::Probe;
pub use progress::ImportProgress;
