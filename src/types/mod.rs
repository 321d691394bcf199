pub mod document;
pub mod error;
pub mod file_type;
pub mod link;
pub mod utils;

pub use document::{Document, Gates, Metadata};
pub use error::{HelixError, Result, ResultExt};
pub use file_type::{Complexity, FileType, Phase, next_phase, phase_number, previous_phase};
pub use link::ParsedLink;
