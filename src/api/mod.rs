//! The API layer, containing extractors, handlers, routing and the server loop.

pub mod extract;
pub mod handlers;
pub mod router;
pub mod server;

pub use router::create_router;
pub use server::{serve, shutdown_signal};
