pub mod entities;
pub mod repositories;

pub use entities::{Comment, CommentDetails, Review, ReviewDetails};
pub use repositories::{CommentRepository, ReviewRepository};
