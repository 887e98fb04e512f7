//! Configuration schema and loader.
//!
//! Settings cover catalog paging, the initial list ordering, row formatting
//! and local library scanning. See `Settings` for the lookup precedence.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
