pub mod error;
pub mod handlers;
pub mod ingest;
pub mod query;
pub mod routes;
pub mod videos;

pub use error::ApiError;
pub use routes::create_router;
