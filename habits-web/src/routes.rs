//! HTTP route handlers.

use axum::Form;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Json, Redirect};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use habits::core::weekday::{WeekDays, Weekday};
use habits::request::{Mutation, apply_mutation};

use crate::render::today;
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/habits", get(list_habits))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// GET / - render the habit page from a fresh load.
async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let habits = state.store.load().map_err(internal_error)?;
    let page = state
        .renderer
        .render_index(&habits, today())
        .map_err(internal_error)?;
    Ok(Html(page))
}

/// Raw form fields. Presence of `add`, `toggle` or `delete` selects the action.
#[derive(Debug, Default, Deserialize)]
struct HabitForm {
    add: Option<String>,
    name: Option<String>,
    toggle: Option<String>,
    delete: Option<String>,
    id: Option<String>,
    day: Option<String>,
}

impl HabitForm {
    /// Map the submitted fields onto a mutation.
    ///
    /// Actions are checked in the order add, toggle, delete. Returns `None`
    /// when no action is complete or the id is not a number.
    fn into_mutation(self) -> Option<Mutation> {
        if let (Some(_), Some(name)) = (&self.add, self.name) {
            return Some(Mutation::Add { name });
        }
        let id = self.id.as_deref().and_then(|raw| raw.trim().parse::<u64>().ok());
        if self.toggle.is_some() {
            if let (Some(id), Some(day)) = (id, self.day) {
                return Some(Mutation::Toggle { id, day });
            }
        }
        if self.delete.is_some() {
            if let Some(id) = id {
                return Some(Mutation::Delete { id });
            }
        }
        None
    }
}

/// POST / - apply one mutation, then redirect back to the page.
async fn submit(
    State(state): State<AppState>,
    Form(form): Form<HabitForm>,
) -> Result<Redirect, StatusCode> {
    match form.into_mutation() {
        Some(mutation) => {
            let now = chrono::Local::now().naive_local();
            apply_mutation(state.store.as_ref(), &mutation, now).map_err(internal_error)?;
        }
        None => debug!("form submission without a usable action"),
    }
    Ok(Redirect::to("/"))
}

#[derive(Serialize)]
struct HabitView<'a> {
    id: u64,
    name: &'a str,
    days: &'a WeekDays,
    created_at: &'a str,
    completion: u8,
}

/// GET /api/habits - current collection as JSON, with percentages.
async fn list_habits(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let habits = state.store.load().map_err(internal_error)?;
    let views: Vec<HabitView<'_>> = habits
        .iter()
        .map(|habit| HabitView {
            id: habit.id,
            name: &habit.name,
            days: &habit.days,
            created_at: &habit.created_at,
            completion: habit.completion(),
        })
        .collect();
    let value = serde_json::to_value(&views).map_err(|err| internal_error(err.into()))?;
    Ok(Json(value))
}

fn internal_error(err: anyhow::Error) -> StatusCode {
    error!(error = %format!("{:#}", err), "request failed");
    StatusCode::INTERNAL_SERVER_ERROR
}
