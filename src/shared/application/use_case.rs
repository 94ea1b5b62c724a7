use crate::shared::errors::AppResult;
/// Base trait for all use cases following CQRS pattern
///
/// This trait provides a standard interface for command handlers
/// following the Single Responsibility Principle.
///
/// # Example
///
/// ```ignore
/// struct RegisterUserHandler {
///     users: Arc<dyn UserRepository>,
/// }
///
/// #[async_trait]
/// impl UseCase<RegisterUserCommand, RegisterUserResult> for RegisterUserHandler {
///     async fn execute(&self, command: RegisterUserCommand) -> AppResult<RegisterUserResult> {
///         // Use case logic here
///     }
/// }
/// ```
use async_trait::async_trait;

/// Base trait for use cases (command handlers)
#[async_trait]
pub trait UseCase<TCommand, TResult> {
    /// Execute the use case with the given command
    async fn execute(&self, command: TCommand) -> AppResult<TResult>;
}
