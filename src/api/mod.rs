pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;

pub use error::AppError;
