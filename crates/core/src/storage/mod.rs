mod error;
mod traits;

pub use error::{RepositoryError, Result};
pub use traits::TechnicianDirectory;
