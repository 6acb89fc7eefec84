//! Extraction, permutation and the worker pool

mod driver;
mod jsluice;
mod permute;

pub use driver::{Driver, WorkStrategy};
pub use jsluice::{parse_output, ExtractedEndpoint, Jsluice};
pub use permute::{base_url, generate, join_params, FUZZ_KEYWORD};
