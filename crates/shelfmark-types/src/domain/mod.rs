pub mod article;
pub mod context;

pub use article::*;
pub use context::*;
