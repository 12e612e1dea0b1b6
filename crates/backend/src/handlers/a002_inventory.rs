use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use contracts::domain::a002_inventory::{
    SheetRowsResponse, UpdateCellResponse, UpdateReplacementDateRequest,
};

use crate::domain::a002_inventory;
use crate::shared::config;
use crate::shared::error::ApiError;
use crate::shared::sheets::google::GoogleSheetsStore;

#[derive(Deserialize)]
pub struct SheetListQuery {
    pub worksheet: Option<String>,
    pub machine: Option<String>,
    pub status: Option<String>,
    pub range: Option<String>,
}

#[derive(Deserialize)]
pub struct SheetPatchQuery {
    pub worksheet: Option<String>,
    pub kodepart: Option<String>,
}

/// GET /api/sheets?worksheet=&machine=&status=&range=
pub async fn list(
    Query(query): Query<SheetListQuery>,
) -> Result<Json<SheetRowsResponse>, ApiError> {
    let worksheet = require(query.worksheet.as_deref(), "worksheet")?;
    let store = GoogleSheetsStore::from_config(config::get())?;
    let response = a002_inventory::service::list(
        &store,
        worksheet,
        query.range.as_deref(),
        query.machine.as_deref(),
        query.status.as_deref(),
    )
    .await?;
    Ok(Json(response))
}

/// PATCH /api/sheets?worksheet=&kodepart=
pub async fn update_replacement_date(
    Query(query): Query<SheetPatchQuery>,
    Json(body): Json<UpdateReplacementDateRequest>,
) -> Result<Json<UpdateCellResponse>, ApiError> {
    let worksheet = require(query.worksheet.as_deref(), "worksheet")?;
    let kodepart = require(query.kodepart.as_deref(), "kodepart")?;
    if body.tanggal_penggantian_terakhir.trim().is_empty() {
        return Err(ApiError::bad_request(
            "tanggalPenggantianTerakhir wajib diisi",
        ));
    }
    let store = GoogleSheetsStore::from_config(config::get())?;
    let response = a002_inventory::service::update_last_replacement(
        &store,
        worksheet,
        kodepart,
        body.tanggal_penggantian_terakhir.trim(),
    )
    .await?;
    Ok(Json(response))
}

fn require<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("Parameter {} wajib diisi", name)))
}
