//! Builders for HTTP state ports and their repository-backed services.

use std::sync::Arc;

use actix_web::web;

use crud_backend::domain::UserService;
use crud_backend::domain::ports::{InMemoryUserRepository, UserRepository, UsersQuery};
use crud_backend::inbound::http::state::HttpState;
use crud_backend::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Build the users query over a repository made from `pool`, falling back to
/// an empty in-memory repository when no pool is configured.
fn build_users_query_with_pool<Pool, Repo>(
    pool: &Option<Pool>,
    make_repository: impl FnOnce(&Pool) -> Repo,
) -> Arc<dyn UsersQuery>
where
    Repo: UserRepository + 'static,
{
    match pool {
        Some(pool) => Arc::new(UserService::new(Arc::new(make_repository(pool)))),
        None => Arc::new(UserService::new(Arc::new(
            InMemoryUserRepository::default(),
        ))),
    }
}

/// Build the shared HTTP state from the configured pool.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let users = build_users_query_with_pool(&config.db_pool, |pool| {
        DieselUserRepository::new(pool.clone())
    });
    web::Data::new(HttpState::new(users))
}
