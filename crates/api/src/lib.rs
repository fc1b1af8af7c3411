pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod server;

pub use error::{ApiError, Result};
pub use handlers::AppState;
pub use router::create_router;
pub use server::run_server;
