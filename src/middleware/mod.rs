pub mod cache;
pub mod cors;

pub use cache::cache_control_middleware;
pub use cors::{build_cors_layer, origin_gate};
