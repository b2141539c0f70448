pub mod auth;
pub mod index;
pub mod questions;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    db::{QuestionStore, UserStore},
    error::ErrorResponse,
    models::{
        question::{AddQuestionRequest, Question, QuestionsResponse, StatusResponse},
        user::LoginResult,
    },
    services::CompanionProbe,
};

/// State shared by all handlers
pub struct AppState {
    pub questions: QuestionStore,
    pub users: UserStore,
    pub probe: Arc<dyn CompanionProbe>,
    /// Public address of the companion UI shown on the landing page
    pub companion_link: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quiz Bank API",
        description = "Random quiz questions via endpoints, plus an admin path to add questions."
    ),
    paths(
        auth::registered_users,
        auth::check_user_login,
        questions::test_types,
        questions::categories,
        questions::get_questions,
        questions::add_question,
        questions::preview_question
    ),
    components(schemas(
        Question,
        QuestionsResponse,
        AddQuestionRequest,
        StatusResponse,
        LoginResult,
        ErrorResponse
    ))
)]
pub struct ApiDoc;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/registered_users", get(auth::registered_users))
        .route("/check_user_login", get(auth::check_user_login))
        .route("/test_types", get(questions::test_types))
        .route("/categories", get(questions::categories))
        .route("/questions", get(questions::get_questions))
        .route("/add_question", post(questions::add_question))
        .route("/preview_question", post(questions::preview_question))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
