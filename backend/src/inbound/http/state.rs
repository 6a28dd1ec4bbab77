//! Shared HTTP adapter state.
//!
//! Handlers receive this state through `actix_web::web::Data` and only see
//! domain ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UsersQuery;

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use crud_backend::domain::UserService;
/// use crud_backend::domain::ports::InMemoryUserRepository;
/// use crud_backend::inbound::http::state::HttpState;
///
/// let service = UserService::new(Arc::new(InMemoryUserRepository::default()));
/// let state = HttpState::new(Arc::new(service));
/// let _users = state.users.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Use case backing `GET /users`.
    pub users: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from the users query port.
    pub fn new(users: Arc<dyn UsersQuery>) -> Self {
        Self { users }
    }
}
