//! Guest list and RSVP endpoints

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::debug;

use guestlist_core::{GuestRecord, RsvpUpdate, SheetStore};

use crate::routes::{ApiError, StatusResponse};
use crate::state::AppState;

const READ_FAILED: &str = "Error leyendo la hoja";
const CONFIRM_FAILED: &str = "Error confirmando asistencia";
const CONFIRM_GROUP_FAILED: &str = "Error confirmando asistencia por grupo";

pub fn router<S: SheetStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/invitados", get(list_guests::<S>))
        .route("/confirmar", post(confirm::<S>))
        .route("/confirmar-grupo", post(confirm_group::<S>))
}

/// Request body for confirming one guest
#[derive(Deserialize, Default)]
pub struct ConfirmRequest {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,

    #[serde(flatten)]
    pub update: RsvpUpdate,
}

/// Request body for confirming a whole group
#[derive(Deserialize, Default)]
pub struct ConfirmGroupRequest {
    #[serde(rename = "idGrupo", default)]
    pub group_id: Option<String>,

    #[serde(flatten)]
    pub update: RsvpUpdate,
}

/// Unreadable bodies are treated as empty; the lookup then finds nothing.
fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(%rejection, "ignoring unreadable request body");
            T::default()
        }
    }
}

/// GET /invitados - List every guest
async fn list_guests<S: SheetStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<GuestRecord>>, ApiError> {
    let guests = state
        .book()
        .guests()
        .await
        .map_err(ApiError::with_failure(READ_FAILED))?;

    Ok(Json(guests))
}

/// POST /confirmar - Record one guest's RSVP
async fn confirm<S: SheetStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let req = body_or_default(payload);
    let name = req.name.unwrap_or_default();

    state
        .book()
        .confirm_guest(&name, &req.update)
        .await
        .map_err(ApiError::with_failure(CONFIRM_FAILED))?;

    Ok(Json(StatusResponse::ok()))
}

/// POST /confirmar-grupo - Record the same RSVP for every guest in a group
async fn confirm_group<S: SheetStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ConfirmGroupRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let req = body_or_default(payload);
    let group_id = req.group_id.unwrap_or_default();

    state
        .book()
        .confirm_group(&group_id, &req.update)
        .await
        .map_err(ApiError::with_failure(CONFIRM_GROUP_FAILED))?;

    Ok(Json(StatusResponse::ok()))
}
