use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Json, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::IntoParams;

use crate::{
    error::{ErrorResponse, Result},
    handlers::{AppState, auth::credentials_from},
    models::question::{AddQuestionRequest, QuestionDraft, QuestionsResponse, StatusResponse},
    services::{
        auth_service,
        question_service::{self, ALL, Selection},
    },
};

/// Query parameters of `GET /questions`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuestionQuery {
    /// Comma separated categories, or `All`
    pub subject: Option<String>,
    /// Test type, or `All`
    #[serde(rename = "use")]
    pub test_type: Option<String>,
    /// Number of random questions, or `All`
    pub question_count: Option<String>,
}

/// List the distinct test types
#[utoipa::path(
    get,
    path = "/test_types",
    responses(
        (status = 200, description = "Sorted distinct test types", body = Vec<String>),
        (status = 500, description = "Question table unreadable", body = ErrorResponse)
    )
)]
pub async fn test_types(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>> {
    let table = state.questions.load()?;
    Ok(Json(table.distinct("use").into_iter().collect()))
}

/// List the distinct categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Sorted distinct categories", body = Vec<String>),
        (status = 500, description = "Question table unreadable", body = ErrorResponse)
    )
)]
pub async fn categories(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>> {
    let table = state.questions.load()?;
    Ok(Json(table.distinct("subject").into_iter().collect()))
}

/// Return all questions, or a filtered random selection
#[utoipa::path(
    get,
    path = "/questions",
    params(QuestionQuery),
    responses(
        (status = 200, description = "Selected questions", body = QuestionsResponse),
        (status = 400, description = "Invalid question count", body = ErrorResponse),
        (status = 404, description = "No question matches the filters", body = ErrorResponse),
        (status = 500, description = "Question table unreadable", body = ErrorResponse)
    )
)]
pub async fn get_questions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuestionQuery>,
) -> Result<Json<QuestionsResponse>> {
    let selection = Selection::parse(
        query.subject.as_deref().unwrap_or(ALL),
        query.test_type.as_deref().unwrap_or(ALL),
        query.question_count.as_deref().unwrap_or(ALL),
    )?;

    let table = state.questions.load()?;
    let questions = question_service::select(&table, &selection, &mut rand::rng())?;

    Ok(Json(QuestionsResponse { questions }))
}

/// A question record as the admin sent it, and as it goes into the table
struct AdminRecord {
    received: Map<String, Value>,
    stored: Map<String, Value>,
}

/// Checks the admin credentials and extracts a valid question record from
/// the body. Rejections are reported as payloads, not HTTP errors.
fn admin_record(headers: &HeaderMap, body: &[u8]) -> std::result::Result<AdminRecord, StatusResponse> {
    if !auth_service::is_admin(&credentials_from(headers)) {
        return Err(StatusResponse::error("Unauthorized: Admin credentials required"));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(StatusResponse::error("No question data provided"));
    }
    let request: AddQuestionRequest = serde_json::from_slice(body)
        .map_err(|e| StatusResponse::error(format!("Invalid question data: {e}")))?;
    let received = match request.new_question {
        Some(record) if !record.is_empty() => record,
        _ => return Err(StatusResponse::error("No question data provided")),
    };

    let mut draft = QuestionDraft::from_record(&received)
        .map_err(|e| StatusResponse::error(format!("Invalid question data: {e}")))?;
    let mut stored = received.clone();
    if stored.contains_key("correct") {
        let correct = draft.normalize_correct().to_string();
        stored.insert("correct".to_string(), Value::String(correct));
    }
    draft.validate().map_err(StatusResponse::error)?;

    Ok(AdminRecord { received, stored })
}

/// Add a new question to the table (admin only)
///
/// The stored row carries the normalized `correct` value; the response
/// echoes the record exactly as received.
#[utoipa::path(
    post,
    path = "/add_question",
    params(
        ("X-Username" = String, Header, description = "Admin user name"),
        ("X-Password" = String, Header, description = "Admin password")
    ),
    request_body = AddQuestionRequest,
    responses(
        (status = 200, description = "Success with the stored record, or an error payload", body = StatusResponse),
        (status = 409, description = "The given nr is taken", body = ErrorResponse),
        (status = 422, description = "Record columns differ from the table", body = ErrorResponse),
        (status = 500, description = "Question table unreadable or unwritable", body = ErrorResponse)
    )
)]
pub async fn add_question(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<StatusResponse>> {
    let record = match admin_record(&headers, &body) {
        Ok(record) => record,
        Err(rejection) => {
            tracing::warn!("Question rejected: {}", rejection.message);
            return Ok(Json(rejection));
        }
    };

    let table = state.questions.load()?.append(&record.stored)?;
    state.questions.persist(&table)?;

    Ok(Json(StatusResponse::success(record.received)))
}

/// Show the table as it would look with the new question, without saving
#[utoipa::path(
    post,
    path = "/preview_question",
    params(
        ("X-Username" = String, Header, description = "Admin user name"),
        ("X-Password" = String, Header, description = "Admin password")
    ),
    request_body = AddQuestionRequest,
    responses(
        (status = 200, description = "All questions, most recent first", body = QuestionsResponse),
        (status = 409, description = "The given nr is taken", body = ErrorResponse),
        (status = 422, description = "Record columns differ from the table", body = ErrorResponse),
        (status = 500, description = "Question table unreadable", body = ErrorResponse)
    )
)]
pub async fn preview_question(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let record = match admin_record(&headers, &body) {
        Ok(record) => record,
        Err(rejection) => return Ok(Json(rejection).into_response()),
    };

    let table = state.questions.load()?.append(&record.stored)?;
    Ok(Json(QuestionsResponse {
        questions: table.into_rows(),
    })
    .into_response())
}
