//! Users API handlers.
//!
//! ```text
//! GET /users
//! ```

use actix_web::{get, web};
use tracing::error;

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::UserSchema;
use crate::inbound::http::state::HttpState;

/// List every user.
///
/// Answers `200` with a JSON array (`[]` when there are no users) or `500`
/// with `{"message": …}` when the backend fails.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use crud_backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await.inspect_err(|err| {
        error!(code = err.code(), message = err.message(), "listing users failed");
    })?;
    Ok(web::Json(users))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{InMemoryUserRepository, MockUsersQuery};
    use crate::domain::{AppError, TRACE_ID_HEADER, UserService};
    use crate::middleware::Trace;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    async fn get_users(users: Arc<dyn crate::domain::ports::UsersQuery>) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new(users)))
                .service(list_users),
        )
        .await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users").to_request(),
        )
        .await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value = serde_json::from_slice(&body).expect("JSON body");
        (status, value)
    }

    fn service_over(repository: InMemoryUserRepository) -> Arc<dyn crate::domain::ports::UsersQuery> {
        Arc::new(UserService::new(Arc::new(repository)))
    }

    #[actix_web::test]
    async fn empty_backend_answers_empty_array() {
        let (status, body) = get_users(service_over(InMemoryUserRepository::default())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn users_are_serialised_in_backend_order() {
        let repository = InMemoryUserRepository::with_users(vec![
            User::new(2, "Bob", "bob@example.com"),
            User::new(1, "Alice", "alice@example.com"),
        ]);

        let (status, body) = get_users(service_over(repository)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "id": 2, "name": "Bob", "email": "bob@example.com" },
                { "id": 1, "name": "Alice", "email": "alice@example.com" },
            ])
        );
    }

    #[actix_web::test]
    async fn service_failure_answers_500_with_message() {
        let mut query = MockUsersQuery::new();
        query
            .expect_list_users()
            .times(1)
            .return_once(|| Err(AppError::internal("connection refused")));

        let (status, body) = get_users(Arc::new(query)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "connection refused" }));
    }

    #[actix_web::test]
    async fn failure_response_carries_request_trace_id() {
        let repository = InMemoryUserRepository::default();
        repository.fail_with("database unavailable");
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .app_data(web::Data::new(HttpState::new(service_over(repository))))
                .service(list_users),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
        let body: ErrorBody = actix_test::read_body_json(response).await;
        assert_eq!(
            body.message,
            "user repository query failed: database unavailable"
        );
    }
}
