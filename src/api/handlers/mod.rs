//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod alias;
pub mod delete;
pub mod health;
pub mod redirect;
pub mod save;

pub use alias::alias_handler;
pub use delete::delete_url_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use save::save_url_handler;
