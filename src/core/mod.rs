//! 核心公共层：错误类型

pub mod error;

pub use error::DialogError;
