// Common test utilities
#![allow(dead_code)]

pub mod app;
pub mod fixtures;
pub mod harness;

pub use app::*;
pub use fixtures::*;
pub use harness::*;
