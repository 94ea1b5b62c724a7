pub mod comment_service;
pub mod dto;
pub mod review_service;

pub use comment_service::CommentService;
pub use dto::{
    CommentResponse, CreateCommentRequest, CreateReviewRequest, ReviewResponse,
    UpdateCommentRequest, UpdateReviewRequest,
};
pub use review_service::ReviewService;
