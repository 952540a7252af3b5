//! Engine module for `argvgram`.
//! See [documentation root](https://docs.rs/argvgram/latest/argvgram/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod grammar;
mod model;
mod parser;
pub mod prelude;
pub mod tokenizer;

pub use api::*;
pub use grammar::*;
pub use model::*;
pub use parser::{CatalogError, ConfigError, ParseError};
pub use tokenizer::{split, Split};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
