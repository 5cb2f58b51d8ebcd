pub mod error;
pub mod types;

pub use error::{Error, ErrorKind};
pub use types::{Article, OrderBy};

pub type Result<T> = std::result::Result<T, Error>;
