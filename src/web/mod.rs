//! Web UI module for postboard.
//!
//! Server-rendered pages for login, registration and the boards.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod views;

pub use error::WebError;
pub use extract::CurrentUser;
pub use router::create_router;
pub use server::WebServer;
