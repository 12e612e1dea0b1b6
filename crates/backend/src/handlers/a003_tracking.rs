use axum::Json;

use contracts::domain::a003_tracking::{CreatePrRequest, CreatePrResponse};
use contracts::enums::kanban_type::KanbanType;

use crate::domain::a003_tracking;
use crate::shared::config;
use crate::shared::error::ApiError;
use crate::shared::sheets::google::GoogleSheetsStore;

/// POST /api/sheets/create-pr
pub async fn create_pr(
    Json(request): Json<CreatePrRequest>,
) -> Result<Json<CreatePrResponse>, ApiError> {
    let config = config::get();
    let kanban_type = request
        .kanban_type
        .as_deref()
        .and_then(KanbanType::from_code)
        .unwrap_or_default();
    let worksheet = config.spreadsheet.worksheets.tracking_for(kanban_type);
    let store = GoogleSheetsStore::from_config(config)?;
    let response = a003_tracking::service::create_pr(&store, worksheet, request).await?;
    Ok(Json(response))
}
