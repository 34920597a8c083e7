pub mod admin;
pub mod dashboard;
pub mod drawer;
pub mod input;
pub mod message;
