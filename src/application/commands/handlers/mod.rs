//! Command Handlers

mod seed_handlers;

pub use seed_handlers::{ResolveSeedHandler, ResolvedSeed, SeedSource};
