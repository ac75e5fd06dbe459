// ── Country cache ──
//
// Process-wide, load-once storage for the country directory with
// push-based state notification.

mod country_cache;

pub use country_cache::{CacheState, CountryCache};
