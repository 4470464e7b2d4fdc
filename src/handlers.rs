pub mod auth;
pub mod catalog;
pub mod content;
pub mod devices;
pub mod documents;
pub mod door;
pub mod purchase;
pub mod rfids;
pub mod secret_questions;
pub mod subusers;
