// HTTP routes
pub mod health;
pub mod relations;

pub use health::*;
pub use relations::*;
