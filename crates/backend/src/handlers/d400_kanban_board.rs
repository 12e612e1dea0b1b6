use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use contracts::dashboards::d400_kanban_board::{KanbanBoardResponse, KanbanSummaryResponse};
use contracts::domain::a003_tracking::{CreatePrRequest, UpdateTrackingRequest};
use contracts::domain::a004_usage_log::UsageRecordRequest;
use contracts::enums::kanban_type::KanbanType;

use crate::dashboards::d400_kanban_board;
use crate::domain::{a003_tracking, a004_usage_log};
use crate::shared::config;
use crate::shared::error::ApiError;
use crate::shared::sheets::google::GoogleSheetsStore;

#[derive(Deserialize)]
pub struct KanbanQuery {
    #[serde(rename = "type")]
    pub kanban_type: Option<String>,
}

/// GET /api/kanban?type=internal|external
pub async fn board(
    Query(query): Query<KanbanQuery>,
) -> Result<Json<KanbanBoardResponse>, ApiError> {
    let kanban_type = parse_type(query.kanban_type.as_deref())?;
    let config = config::get();
    let worksheets = &config.spreadsheet.worksheets;
    let store = GoogleSheetsStore::from_config(config)?;
    let response = d400_kanban_board::service::board(
        &store,
        worksheets.inventory_for(kanban_type),
        worksheets.tracking_for(kanban_type),
        kanban_type,
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/kanban/summary?type=internal|external
pub async fn summary(
    Query(query): Query<KanbanQuery>,
) -> Result<Json<KanbanSummaryResponse>, ApiError> {
    let kanban_type = parse_type(query.kanban_type.as_deref())?;
    let config = config::get();
    let worksheets = &config.spreadsheet.worksheets;
    let store = GoogleSheetsStore::from_config(config)?;
    let response = d400_kanban_board::service::summary(
        &store,
        worksheets.inventory_for(kanban_type),
        worksheets.tracking_for(kanban_type),
        kanban_type,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/kanban
///
/// The body is `{ "payload": { ... } }`. A payload carrying a quantity and
/// no PR number is a usage-ledger entry; anything else creates a PR
/// tracking row.
pub async fn create(Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    let payload = body.get("payload").cloned().unwrap_or(body);
    let config = config::get();
    let store = GoogleSheetsStore::from_config(config)?;

    if is_usage_payload(&payload) {
        let request: UsageRecordRequest = serde_json::from_value(payload)
            .map_err(|e| ApiError::bad_request(format!("Payload pemakaian tidak valid: {}", e)))?;
        let response = a004_usage_log::service::record_usage(
            &store,
            &config.spreadsheet.worksheets.usage_log,
            request,
        )
        .await?;
        return Ok(Json(serde_json::to_value(response).map_err(anyhow::Error::from)?));
    }

    let request: CreatePrRequest = serde_json::from_value(payload)
        .map_err(|e| ApiError::bad_request(format!("Payload PR tidak valid: {}", e)))?;
    let kanban_type = request
        .kanban_type
        .as_deref()
        .and_then(KanbanType::from_code)
        .unwrap_or_default();
    let worksheet = config.spreadsheet.worksheets.tracking_for(kanban_type);
    let response = a003_tracking::service::create_pr(&store, worksheet, request).await?;
    Ok(Json(serde_json::to_value(response).map_err(anyhow::Error::from)?))
}

/// PATCH /api/kanban?type=internal|external
pub async fn update(
    Query(query): Query<KanbanQuery>,
    Json(request): Json<UpdateTrackingRequest>,
) -> Result<Json<Value>, ApiError> {
    let kanban_type = parse_type(query.kanban_type.as_deref())?;
    let config = config::get();
    let worksheet = config.spreadsheet.worksheets.tracking_for(kanban_type);
    let store = GoogleSheetsStore::from_config(config)?;
    let response =
        a003_tracking::service::update_tracking(&store, worksheet, request.payload).await?;
    Ok(Json(serde_json::to_value(response).map_err(anyhow::Error::from)?))
}

fn parse_type(raw: Option<&str>) -> Result<KanbanType, ApiError> {
    match raw {
        None => Ok(KanbanType::default()),
        Some(value) => KanbanType::from_code(value).ok_or_else(|| {
            ApiError::bad_request("Parameter type harus internal atau external")
        }),
    }
}

fn is_usage_payload(payload: &Value) -> bool {
    payload.get("qty").is_some() && payload.get("noPr").is_none()
}
