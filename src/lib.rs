pub mod types;
pub mod error;
pub mod config;
pub mod model;
pub mod events;
pub mod transport;
pub mod session;
pub mod router;
pub mod voice;
pub mod handler;
pub mod liveness;
