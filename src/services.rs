pub mod auth;
pub mod jwt;
pub mod token_blacklist;
pub mod user_service;
pub mod device_service;
pub mod door_service;
pub mod access_throttle;
pub mod subuser_service;
pub mod purchase_service;
pub mod document_service;
pub mod mailer;
