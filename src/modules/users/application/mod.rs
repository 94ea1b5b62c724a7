pub mod dto;
pub mod service;

pub use dto::{CreateUserRequest, UpdateUserRequest, UserListQuery, UserResponse};
pub use service::UserService;
