pub mod column_role;
pub mod config;
pub mod country;
pub mod solar_frame;
pub mod summary;
