pub mod config;
pub mod errors;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod profile_edit;
pub mod session;
pub mod stack;
pub mod state;
pub mod templates_structs;
pub mod todo;
