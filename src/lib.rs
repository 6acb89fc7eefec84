//! jsfuzz: turn jsluice endpoint records into FUZZ-marked URL seeds

pub mod cli;
pub mod core;
pub mod error;
pub mod output;
pub mod pipeline;

pub use crate::core::{generate, Driver, ExtractedEndpoint, Jsluice, WorkStrategy};
pub use crate::error::{JsfuzzError, Result};
