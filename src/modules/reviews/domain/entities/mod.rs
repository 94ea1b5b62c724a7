pub mod comment;
pub mod review;

pub use comment::{Comment, CommentDetails};
pub use review::{Review, ReviewDetails};
