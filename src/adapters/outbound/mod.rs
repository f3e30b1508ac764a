mod html_block_renderer;
mod http_geo_provider;
mod memory_key_value_store;
mod sqlite_key_value_store;

pub use html_block_renderer::{BlockPageConfig, HtmlBlockRenderer};
pub use http_geo_provider::{Endpoint, HttpGeoProvider, ResponseSchema, DEFAULT_PROVIDER_TIMEOUT};
pub use memory_key_value_store::MemoryKeyValueStore;
pub use sqlite_key_value_store::SqliteKeyValueStore;
