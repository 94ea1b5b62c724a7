pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

pub use application::{CommentService, ReviewService};
pub use domain::{Comment, Review};
