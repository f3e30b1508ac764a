pub mod blocklist;
mod location_cache;

pub use blocklist::{evaluate, is_blocked};
pub use location_cache::{LocationCache, DEFAULT_CACHE_KEY};
