//! Application Layer
//!
//! Use cases orchestrating the domain: resolve, decide, trigger.

mod bootstrap;
mod country_gate;
mod country_resolver;

pub use bootstrap::Bootstrap;
pub use country_gate::CountryGate;
pub use country_resolver::CountryResolver;
