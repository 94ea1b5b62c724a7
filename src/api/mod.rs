//! HTTP surface: shared state, extractors and the route table.
pub mod extract;
pub mod fallback;
pub mod registry;
pub mod state;

pub use registry::{build_router, API_PREFIX};
pub use state::{AppState, Repositories};
