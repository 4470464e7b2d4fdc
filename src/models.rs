pub mod auth;
pub mod catalog;
pub mod content;
pub mod device;
pub mod door;
pub mod purchase;
pub mod secret_question;
pub mod subuser;
