pub mod filters;
pub mod property;
