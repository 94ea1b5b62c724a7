use std::sync::Arc;

use crate::modules::auth::application::{
    Authenticator, MailDispatcher, ObtainTokenHandler, RegisterUserHandler,
};
use crate::modules::auth::infrastructure::TokenService;
use crate::modules::catalog::application::{TaxonomyService, TitleService};
use crate::modules::catalog::domain::{TaxonomyRepository, TitleRepository};
use crate::modules::catalog::infrastructure::{TaxonomyRepositoryImpl, TitleRepositoryImpl};
use crate::modules::reviews::application::{CommentService, ReviewService};
use crate::modules::reviews::domain::{CommentRepository, ReviewRepository};
use crate::modules::reviews::infrastructure::{CommentRepositoryImpl, ReviewRepositoryImpl};
use crate::modules::users::application::UserService;
use crate::modules::users::domain::UserRepository;
use crate::modules::users::infrastructure::UserRepositoryImpl;
use crate::shared::config::{AppConfig, PaginationSettings};
use crate::shared::errors::AppResult;
use crate::shared::validation::Validator;
use crate::shared::Database;

/// Storage seams. Production wires the diesel implementations; tests can
/// hand in anything that implements the traits.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub taxonomies: Arc<dyn TaxonomyRepository>,
    pub titles: Arc<dyn TitleRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    pub fn postgres(db: &Arc<Database>) -> Self {
        Self {
            users: Arc::new(UserRepositoryImpl::new(Arc::clone(db))),
            taxonomies: Arc::new(TaxonomyRepositoryImpl::new(Arc::clone(db))),
            titles: Arc::new(TitleRepositoryImpl::new(Arc::clone(db))),
            reviews: Arc::new(ReviewRepositoryImpl::new(Arc::clone(db))),
            comments: Arc::new(CommentRepositoryImpl::new(Arc::clone(db))),
        }
    }
}

/// Everything a handler can reach. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub taxonomies: Arc<TaxonomyService>,
    pub titles: Arc<TitleService>,
    pub reviews: Arc<ReviewService>,
    pub comments: Arc<CommentService>,
    pub register_user: Arc<RegisterUserHandler>,
    pub obtain_token: Arc<ObtainTokenHandler>,
    pub authenticator: Arc<Authenticator>,
    pub pagination: PaginationSettings,
    pub database: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        config: &AppConfig,
        mail_dispatcher: Arc<dyn MailDispatcher>,
    ) -> AppResult<Self> {
        let validator = Arc::new(Validator::new(config.validation.clone())?);
        let token_service = Arc::new(TokenService::new(&config.auth));

        Ok(Self {
            users: Arc::new(UserService::new(
                Arc::clone(&repos.users),
                Arc::clone(&validator),
            )),
            taxonomies: Arc::new(TaxonomyService::new(
                Arc::clone(&repos.taxonomies),
                Arc::clone(&validator),
            )),
            titles: Arc::new(TitleService::new(
                Arc::clone(&repos.titles),
                Arc::clone(&repos.taxonomies),
                Arc::clone(&validator),
            )),
            reviews: Arc::new(ReviewService::new(
                Arc::clone(&repos.reviews),
                Arc::clone(&repos.titles),
                Arc::clone(&validator),
            )),
            comments: Arc::new(CommentService::new(
                Arc::clone(&repos.comments),
                Arc::clone(&repos.reviews),
                Arc::clone(&validator),
            )),
            register_user: Arc::new(RegisterUserHandler::new(
                Arc::clone(&repos.users),
                mail_dispatcher,
                Arc::clone(&validator),
                config.mail.clone(),
            )),
            obtain_token: Arc::new(ObtainTokenHandler::new(
                Arc::clone(&repos.users),
                Arc::clone(&token_service),
                config.auth.confirmation_code_ttl,
            )),
            authenticator: Arc::new(Authenticator::new(token_service, repos.users)),
            pagination: config.pagination,
            database: None,
        })
    }

    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }
}
