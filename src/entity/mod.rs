//! SeaORM entity definitions.

pub mod photo;
pub mod team;
pub mod user;
pub mod worksheet;
pub mod zone;
