pub mod user_repo;
pub use user_repo::UserRepository;
pub mod secret_question_repo;
pub use secret_question_repo::SecretQuestionRepository;
pub mod device_repo;
pub use device_repo::DeviceRepository;
pub mod subuser_repo;
pub use subuser_repo::SubUserRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod purchase_repo;
pub use purchase_repo::PurchaseRepository;
pub mod content_repo;
pub use content_repo::ContentRepository;
