pub mod comment_repository_impl;
pub mod review_repository_impl;

pub use comment_repository_impl::CommentRepositoryImpl;
pub use review_repository_impl::ReviewRepositoryImpl;
