pub mod body;
pub mod catalogue;
pub mod elements;
pub mod error;
pub mod prelude;
pub mod star_system;
