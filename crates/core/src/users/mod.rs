pub mod users_model;
pub mod users_repository;
pub mod users_service;
pub mod users_traits;

pub use users_model::*;
pub use users_repository::UserRepository;
pub use users_service::UserService;
pub use users_traits::*;
