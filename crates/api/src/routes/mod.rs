pub mod admin;
pub mod client;
pub mod functions;
pub mod health;
pub mod notification;
pub mod part;
pub mod project;
pub mod proposal;
pub mod task;
pub mod webhook;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::middleware::api_token::require_api_token;
use crate::state::AppState;

/// Build the `/api/v1` route tree. Every route requires the admin API token.
///
/// Route hierarchy:
///
/// ```text
/// /clients                                  list, create
/// /clients/{id}                             get, update, delete
///
/// /projects                                 list, create
/// /projects/{id}                            get, update, delete
/// /projects/{id}/tasks                      scoped task listing
/// /projects/{id}/activity                   activity trail (paginated)
///
/// /tasks                                    create
/// /tasks/{id}                               get, update, delete
///
/// /parts                                    list (?project_id=), create
/// /parts/{id}                               get, update, delete
///
/// /proposals                                list, create
/// /proposals/{id}                           get, update, delete
///
/// /notifications                            list (?user_id=&unread_only=)
/// /notifications/unread-count               unread counter
/// /notifications/{id}/read                  mark one read (POST)
/// /notifications/read-all                   mark all read (POST)
/// /notifications/settings                   get, update per-user settings
///
/// /admin/integrations                       get, update the singleton
/// /admin/integrations/{name}/test           live connection test (POST)
/// /admin/integrations/{name}/rotate-secret  fresh webhook secret (POST)
/// ```
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/clients", client::router())
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .nest("/parts", part::router())
        .nest("/proposals", proposal::router())
        .nest("/notifications", notification::router())
        .nest("/admin", admin::router())
        .layer(from_fn_with_state(state, require_api_token))
}
