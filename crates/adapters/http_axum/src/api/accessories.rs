//! JSON REST handlers for door accessories.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use garagehub_app::ports::{OpenNotifier, StateStore};
use garagehub_domain::capability::Capability;
use garagehub_domain::door::{DoorPosition, DoorState};

use crate::error::ApiError;
use crate::state::AppState;

/// One entry of the accessory list.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessorySummary {
    pub id: String,
    pub name: String,
    pub state: DoorState,
}

/// Full description of an accessory.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessoryDetail {
    pub id: String,
    pub name: String,
    pub state: DoorState,
    pub capabilities: Vec<Capability>,
}

/// Target door state, as the characteristic value and by name.
#[derive(Debug, Serialize, Deserialize)]
pub struct TargetState {
    pub value: u8,
    pub position: DoorPosition,
}

impl From<DoorPosition> for TargetState {
    fn from(position: DoorPosition) -> Self {
        Self {
            value: position.as_characteristic(),
            position,
        }
    }
}

/// Request body for writing the target state.
///
/// `value` is passed through untouched: `0`/`"open"` and `1`/`"closed"`
/// move the door, anything else is accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct SetTargetRequest {
    pub value: serde_json::Value,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<AccessorySummary>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<AccessoryDetail>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the target-state endpoints.
pub enum TargetResponse {
    Ok(Json<TargetState>),
    Updated(Json<DoorState>),
}

impl IntoResponse for TargetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Updated(json) => json.into_response(),
        }
    }
}

/// `GET /api/accessories`
pub async fn list<S, N>(State(state): State<AppState<S, N>>) -> ListResponse
where
    S: StateStore + Send + Sync + 'static,
    N: OpenNotifier + Send + Sync + 'static,
{
    let accessories = state
        .bridge
        .list()
        .map(|accessory| AccessorySummary {
            id: accessory.id().to_string(),
            name: accessory.name().to_string(),
            state: accessory.state(),
        })
        .collect();
    ListResponse::Ok(Json(accessories))
}

/// `GET /api/accessories/{id}`
pub async fn get<S, N>(
    State(state): State<AppState<S, N>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    N: OpenNotifier + Send + Sync + 'static,
{
    let accessory = state.bridge.get(&id)?;
    Ok(GetResponse::Ok(Json(AccessoryDetail {
        id: accessory.id().to_string(),
        name: accessory.name().to_string(),
        state: accessory.state(),
        capabilities: accessory.capabilities(),
    })))
}

/// `GET /api/accessories/{id}/target`
pub async fn get_target<S, N>(
    State(state): State<AppState<S, N>>,
    Path(id): Path<String>,
) -> Result<TargetResponse, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    N: OpenNotifier + Send + Sync + 'static,
{
    let position = state.bridge.get_target_state(&id)?;
    Ok(TargetResponse::Ok(Json(position.into())))
}

/// `PUT /api/accessories/{id}/target`
pub async fn set_target<S, N>(
    State(state): State<AppState<S, N>>,
    Path(id): Path<String>,
    Json(req): Json<SetTargetRequest>,
) -> Result<TargetResponse, ApiError>
where
    S: StateStore + Send + Sync + 'static,
    N: OpenNotifier + Send + Sync + 'static,
{
    let door = state.bridge.set_target_state(&id, &req.value).await?;
    Ok(TargetResponse::Updated(Json(door)))
}
