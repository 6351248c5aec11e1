//! HTTP Handlers

mod character;
mod ping;
mod preferences;
mod seed;

pub use character::*;
pub use ping::*;
pub use preferences::*;
pub use seed::*;
