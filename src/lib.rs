pub mod config;
pub mod domain;
pub mod error;
pub mod fmt_check;
pub mod gate;
pub mod git;
pub mod ui;

pub use error::{GitGuardError, Result};
