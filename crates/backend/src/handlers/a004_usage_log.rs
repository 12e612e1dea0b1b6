use axum::Json;

use contracts::domain::a004_usage_log::UsageLogResponse;

use crate::domain::a004_usage_log;
use crate::shared::config;
use crate::shared::error::ApiError;
use crate::shared::sheets::google::GoogleSheetsStore;

/// GET /api/pemakaian
pub async fn list() -> Result<Json<UsageLogResponse>, ApiError> {
    let config = config::get();
    let store = GoogleSheetsStore::from_config(config)?;
    let response = a004_usage_log::service::list_usage(
        &store,
        &config.spreadsheet.worksheets.usage_log,
    )
    .await?;
    Ok(Json(response))
}
