use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::{CatalogQuery, SortKey};
use crate::dashboard::{Dashboard, DashboardTab};
use crate::error::AppError;
use crate::identity::{UserProfile, check_credentials};
use crate::models::{Category, Chapter, Course, Difficulty, Tutorial};
use crate::session::{Session, Theme};
use crate::state::AppState;
use crate::tutorial::{ChapterCursor, QuizResult, TutorialError, grade_quiz};

#[derive(Deserialize)]
struct CourseQueryParams {
    q: Option<String>,
    difficulty: Option<String>,
    category: Option<String>,
    sort: Option<String>,
}

#[derive(Deserialize)]
struct TutorialParams {
    #[serde(default)]
    chapter: usize,
}

#[derive(Deserialize)]
struct DashboardParams {
    tab: Option<String>,
}

#[derive(Deserialize)]
struct ThemeParams {
    current: Option<Theme>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct QuizSubmission {
    pub answers: HashMap<String, usize>,
}

#[derive(Serialize)]
struct CourseCard {
    #[serde(flatten)]
    course: Course,
    duration_label: String,
}

#[derive(Serialize)]
struct CourseList {
    courses: Vec<CourseCard>,
    shown: usize,
    total: usize,
    query: CatalogQuery,
}

#[derive(Serialize)]
struct FilterOption {
    value: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct FilterOptions {
    difficulties: Vec<FilterOption>,
    categories: Vec<FilterOption>,
    sorts: Vec<FilterOption>,
}

#[derive(Serialize)]
struct TutorialView<'a> {
    tutorial: &'a Tutorial,
    active_chapter: &'a Chapter,
    cursor: ChapterCursor,
    position: String,
    completed_chapters: Vec<&'a str>,
    percent_complete: u8,
}

#[derive(Serialize)]
struct ChapterToggle {
    chapter_id: String,
    completed: bool,
    percent_complete: u8,
}

#[derive(Serialize)]
struct LoginResponse {
    token: Uuid,
    user: UserProfile,
}

#[derive(Serialize)]
struct MeResponse {
    user: UserProfile,
    theme: Theme,
}

#[derive(Serialize)]
struct ThemeResponse {
    theme: Theme,
    stored: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses))
        .route("/courses/filters", get(course_filters))
        .route("/courses/{id}", get(get_course))
        .route("/tutorials/{slug}", get(get_tutorial))
        .route("/tutorials/{slug}/quiz", post(submit_quiz))
        .route("/tutorials/{slug}/chapters/{chapter_id}/toggle", post(toggle_chapter))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/preferences/theme/toggle", post(toggle_theme))
        .route("/dashboard", get(dashboard))
        .with_state(state)
}

fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
}

async fn current_session(state: &AppState, headers: &HeaderMap) -> Option<(Uuid, Session)> {
    let token = bearer_token(headers)?;
    let session = state.sessions.get(&token).await?;
    Some((token, session))
}

async fn require_session(
    state: &AppState,
    headers: &HeaderMap,
    message: &str,
) -> Result<(Uuid, Session), AppError> {
    current_session(state, headers)
        .await
        .ok_or_else(|| AppError::Unauthorized(message.to_string()))
}

/// Progress is only shown to signed-in learners.
fn visible_course(course: &Course, signed_in: bool) -> CourseCard {
    let mut course = course.clone();
    if !signed_in {
        course.progress = None;
    }
    CourseCard {
        duration_label: course.duration_label(),
        course,
    }
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn list_courses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CourseQueryParams>,
) -> Json<CourseList> {
    let query = CatalogQuery::from_wire(
        params.q.as_deref(),
        params.difficulty.as_deref(),
        params.category.as_deref(),
        params.sort.as_deref(),
    );
    if query.sort == SortKey::Unsorted {
        debug!("unrecognised sort key {:?}, keeping catalog order", params.sort);
    }

    let signed_in = current_session(&state, &headers).await.is_some();
    let page = state.catalog.search(query);

    Json(CourseList {
        courses: page.courses.into_iter().map(|c| visible_course(c, signed_in)).collect(),
        shown: page.shown,
        total: page.total,
        query: page.query,
    })
}

async fn course_filters() -> Json<FilterOptions> {
    let all = FilterOption { value: "all", label: "All Levels" };
    let mut difficulties = vec![all];
    difficulties.extend(Difficulty::all().iter().map(|d| FilterOption {
        value: d.as_str(),
        label: d.label(),
    }));

    let mut categories = vec![FilterOption { value: "all", label: "All Categories" }];
    categories.extend(Category::all().iter().map(|c| FilterOption {
        value: c.as_str(),
        label: c.label(),
    }));

    let sorts = SortKey::all()
        .iter()
        .map(|s| FilterOption { value: s.as_str(), label: s.label() })
        .collect();

    Json(FilterOptions { difficulties, categories, sorts })
}

async fn get_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<CourseCard>, AppError> {
    let course = state.catalog.get(&id).ok_or(AppError::NotFound)?;
    let signed_in = current_session(&state, &headers).await.is_some();
    Ok(Json(visible_course(course, signed_in)))
}

async fn get_tutorial(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Query(params): Query<TutorialParams>,
) -> Result<Response, AppError> {
    let tutorial = state.tutorials.get(&slug).ok_or(AppError::NotFound)?;
    let cursor = ChapterCursor::at(tutorial.chapters.len(), params.chapter)?;
    let session = current_session(&state, &headers).await.map(|(_, s)| s);
    let progress = session.as_ref().and_then(|s| s.chapter_progress(&slug));

    let view = TutorialView {
        tutorial,
        active_chapter: &tutorial.chapters[cursor.index()],
        cursor,
        position: cursor.position(),
        completed_chapters: progress.map(|p| p.completed().collect()).unwrap_or_default(),
        percent_complete: progress
            .map(|p| p.percent_complete(tutorial.chapters.len()))
            .unwrap_or(0),
    };

    Ok(Json(view).into_response())
}

async fn submit_quiz(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(submission): Json<QuizSubmission>,
) -> Result<Json<QuizResult>, AppError> {
    let tutorial = state.tutorials.get(&slug).ok_or(AppError::NotFound)?;
    let answers = submission.answers.iter().map(|(id, option)| (id.as_str(), *option));
    let result = grade_quiz(tutorial, answers)?;
    info!("quiz for {} graded: {}/{}", slug, result.correct, result.total);
    Ok(Json(result))
}

async fn toggle_chapter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((slug, chapter_id)): Path<(String, String)>,
) -> Result<Json<ChapterToggle>, AppError> {
    let (token, _) = require_session(&state, &headers, "Please sign in to track your progress.").await?;
    let tutorial = state.tutorials.get(&slug).ok_or(AppError::NotFound)?;
    if !tutorial.chapters.iter().any(|c| c.id == chapter_id) {
        return Err(TutorialError::UnknownChapter(chapter_id).into());
    }

    let total = tutorial.chapters.len();
    let (completed, percent_complete) = state
        .sessions
        .update(&token, |session| {
            let progress = session.chapter_progress_mut(&slug);
            let completed = progress.toggle(&chapter_id);
            (completed, progress.percent_complete(total))
        })
        .await
        .ok_or_else(|| AppError::Unauthorized("Session expired.".to_string()))?;

    Ok(Json(ChapterToggle {
        chapter_id,
        completed,
        percent_complete,
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    check_credentials(&req.email, &req.password)?;
    let user = state.identity.sign_in(req.email.trim(), &req.password).await?;
    let token = state.sessions.create(user.clone()).await;
    info!("user {} signed in", user.uid);
    Ok(Json(LoginResponse { token, user }))
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let (token, session) = require_session(&state, &headers, "Not signed in.").await?;
    state.identity.sign_out(&session.user.uid).await?;
    state.sessions.remove(&token).await;
    info!("user {} signed out", session.user.uid);
    Ok(StatusCode::NO_CONTENT)
}

async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, AppError> {
    let (_, session) = require_session(&state, &headers, "Not signed in.").await?;
    Ok(Json(MeResponse {
        user: session.user,
        theme: session.theme,
    }))
}

async fn toggle_theme(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ThemeParams>,
) -> Json<ThemeResponse> {
    if let Some(token) = bearer_token(&headers) {
        let stored = state
            .sessions
            .update(&token, |session| {
                session.theme = session.theme.toggle();
                session.theme
            })
            .await;
        if let Some(theme) = stored {
            return Json(ThemeResponse { theme, stored: true });
        }
    }

    Json(ThemeResponse {
        theme: params.current.unwrap_or_default().toggle(),
        stored: false,
    })
}

async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DashboardParams>,
) -> Result<Response, AppError> {
    let (_, session) = require_session(
        &state,
        &headers,
        "Please log in to access your dashboard.",
    )
    .await?;

    let tab = match params.tab.as_deref() {
        None => DashboardTab::default(),
        Some(raw) => DashboardTab::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown dashboard tab: {}", raw)))?,
    };

    let dashboard = Dashboard::for_user(session.user);
    Ok(Json(dashboard.view(tab)).into_response())
}
