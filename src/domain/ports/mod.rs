mod block_renderer;
mod clock;
mod geo_provider;
mod key_value_store;

pub use block_renderer::BlockRenderer;
pub use clock::{Clock, SystemClock};
pub use geo_provider::GeoProvider;
pub use key_value_store::KeyValueStore;
