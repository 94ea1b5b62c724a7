pub mod comment_repository;
pub mod review_repository;

pub use comment_repository::CommentRepository;
pub use review_repository::ReviewRepository;
