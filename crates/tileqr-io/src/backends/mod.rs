mod text;

pub use text::TextMatrix;
