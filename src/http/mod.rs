mod handlers;
pub mod server;
pub mod text;

pub use handlers::AppState;
