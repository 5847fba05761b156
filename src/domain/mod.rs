mod entity;
mod route;
mod station;

pub use entity::{EntityKind, Model};
pub use route::Route;
pub use station::Station;
