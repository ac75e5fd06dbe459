// atlas-api: Async Rust clients for the country directory, weather lookup,
// and backend-as-a-service (row storage + token auth) APIs.

pub mod backend;
pub mod countries;
pub mod error;
pub mod transport;
pub mod weather;

pub use backend::{BackendClient, Session};
pub use countries::CountriesClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use weather::WeatherClient;

// Re-export the wire types under stable names for consumers.
pub use backend::types as backend_types;
pub use countries::types as country_types;
pub use weather::types as weather_types;
