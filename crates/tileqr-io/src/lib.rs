pub mod backends;
pub mod error;
pub mod traits;

pub use backends::TextMatrix;
pub use error::IoError;
pub use traits::{MatrixSink, MatrixSource};
