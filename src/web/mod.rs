//! Web server module
//!
//! Provides the JSON API and the browser interface for askweb.

mod handlers;
mod routes;
mod state;
mod templates;

pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
