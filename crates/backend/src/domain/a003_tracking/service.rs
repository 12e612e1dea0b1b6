use chrono::Utc;
use contracts::domain::a003_tracking::{
    json_value_to_cell, CreatePrRequest, CreatePrResponse, UpdateTrackingPayload,
    UpdateTrackingResponse,
};
use contracts::enums::kanban_type::KanbanType;

use super::columns;
use crate::shared::error::ApiError;
use crate::shared::sheets::{a1, CellUpdate, SheetsStore};

/// Read window covering the fixed A..R layout
const READ_RANGE: &str = "A1:R2000";

pub const STATUS_PR_CREATED: &str = "PR Dibuat";
pub const STATUS_PO_SUBMITTED: &str = "PO Sudah Dibuat";
pub const STATUS_COMPLETED: &str = "Sudah Diterima";

/// Append a new PR row to the tracking worksheet.
///
/// The PR number defaults to a timestamp-derived identifier. There is no
/// uniqueness check against existing rows; duplicate numbers resolve to the
/// earliest row on later updates.
pub async fn create_pr(
    store: &dyn SheetsStore,
    worksheet: &str,
    request: CreatePrRequest,
) -> Result<CreatePrResponse, ApiError> {
    if request.code_part.trim().is_empty() {
        return Err(ApiError::bad_request("Kode part wajib diisi"));
    }
    if request.part.trim().is_empty() {
        return Err(ApiError::bad_request("Nama part wajib diisi"));
    }

    let no_pr = request
        .no_pr
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generated_pr_number);
    let date = request
        .date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(today);
    let kanban_type = request
        .kanban_type
        .as_deref()
        .and_then(KanbanType::from_code)
        .unwrap_or_default();

    let mut row = vec![String::new(); columns::WIDTH];
    row[columns::TANGGAL_PR] = date;
    row[columns::NO_PR] = no_pr.clone();
    row[columns::KODE_PART] = request.code_part.trim().to_string();
    row[columns::PART] = request.part.trim().to_string();
    row[columns::BULAN_FORM] = request.form_month.clone().unwrap_or_default();
    row[columns::QTY] = request
        .quantity
        .as_ref()
        .map(json_value_to_cell)
        .unwrap_or_default();
    row[columns::UOM] = request.uom.clone().unwrap_or_default();
    row[columns::VENDOR] = request.vendor.clone().unwrap_or_default();
    row[columns::STATUS] = STATUS_PR_CREATED.to_string();
    row[columns::KANBAN_TYPE] = kanban_type.code().to_string();

    store.append_row(worksheet, row).await?;
    tracing::info!("Created PR {} on {}", no_pr, worksheet);

    Ok(CreatePrResponse {
        success: true,
        no_pr,
        worksheet: worksheet.to_string(),
    })
}

/// Write the supplied fields onto the first tracking row whose PR number
/// matches (trimmed, case-sensitive).
///
/// Status auto-advances when the caller did not set one: a PO number moves
/// the row to "PO Sudah Dibuat", a receipt date to "Sudah Diterima" plus a
/// completion-date stamp. Fails without touching the sheet when the PR is
/// unknown or the payload carries nothing to write. Two concurrent updates
/// to the same PR interleave arbitrarily; the last write per cell wins.
pub async fn update_tracking(
    store: &dyn SheetsStore,
    worksheet: &str,
    payload: UpdateTrackingPayload,
) -> Result<UpdateTrackingResponse, ApiError> {
    let no_pr = payload.no_pr.trim().to_string();
    if no_pr.is_empty() {
        return Err(ApiError::bad_request("noPr wajib diisi"));
    }
    if payload.is_empty() {
        return Err(ApiError::bad_request("Tidak ada field yang bisa diupdate"));
    }

    let rows = store.get_rows(worksheet, READ_RANGE).await?;
    let row_number = rows
        .iter()
        .position(|row| row.get(columns::NO_PR).map(|c| c.trim()) == Some(no_pr.as_str()))
        .map(|index| index + 1)
        .ok_or_else(|| {
            ApiError::not_found(format!("PR {} tidak ditemukan di {}", no_pr, worksheet))
        })?;

    let mut updates = Vec::new();
    let mut push = |column: usize, value: String| {
        updates.push(CellUpdate::new(a1::cell(column, row_number), value));
    };
    if let Some(po) = &payload.po {
        push(columns::NO_PO, po.clone());
    }
    if let Some(tanggal_po) = &payload.tanggalpo {
        push(columns::TANGGAL_PO, tanggal_po.clone());
    }
    if let Some(harga) = &payload.harga {
        push(columns::HARGA, json_value_to_cell(harga));
    }
    if let Some(leadtime) = &payload.leadtime {
        push(columns::LEADTIME, json_value_to_cell(leadtime));
    }
    if let Some(eta) = &payload.eta {
        push(columns::ETA, eta.clone());
    }
    if let Some(tanggal_receipt) = &payload.tanggalreceipt {
        push(columns::TANGGAL_RECEIPT, tanggal_receipt.clone());
    }
    if let Some(no_receipt) = &payload.noreceipt {
        push(columns::NO_RECEIPT, no_receipt.clone());
    }

    let status = payload.status.clone().or_else(|| {
        if payload.tanggalreceipt.is_some() {
            Some(STATUS_COMPLETED.to_string())
        } else if payload.po.is_some() {
            Some(STATUS_PO_SUBMITTED.to_string())
        } else {
            None
        }
    });
    if let Some(status_value) = &status {
        push(columns::STATUS, status_value.clone());
    }
    if payload.tanggalreceipt.is_some() && payload.status.is_none() {
        push(columns::TANGGAL_SELESAI, today());
    }

    let updated_cells = updates.len();
    store.update_cells(worksheet, updates).await?;
    tracing::info!(
        "Updated PR {} on {} ({} cells)",
        no_pr,
        worksheet,
        updated_cells
    );

    Ok(UpdateTrackingResponse {
        success: true,
        no_pr,
        updated_cells,
        status,
    })
}

fn generated_pr_number() -> String {
    format!("PR-{}", Utc::now().timestamp_millis())
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::sheets::memory::InMemorySheetsStore;

    const WS: &str = "Tracking PR Internal";

    fn tracking_header() -> Vec<String> {
        [
            "Tanggal PR",
            "No PR",
            "Kode Part",
            "Part",
            "Bulan Form",
            "Qty",
            "UOM",
            "Vendor",
            "Harga",
            "Leadtime",
            "ETA",
            "No PO",
            "Tanggal PO",
            "Tanggal Receipt",
            "No Receipt",
            "Status",
            "Tanggal Selesai",
            "Kanban Type",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn request(no_pr: Option<&str>) -> CreatePrRequest {
        CreatePrRequest {
            date: Some("2025-02-01".into()),
            no_pr: no_pr.map(str::to_string),
            code_part: "P-01".into(),
            part: "Bearing 6204".into(),
            form_month: Some("Februari".into()),
            quantity: Some(serde_json::json!(4)),
            uom: Some("pcs".into()),
            vendor: Some("PT Sumber Teknik".into()),
            kanban_type: Some("internal".into()),
        }
    }

    #[tokio::test]
    async fn test_create_pr_appends_full_width_row() {
        let store = InMemorySheetsStore::new();
        store.seed(WS, vec![tracking_header()]);
        let response = create_pr(&store, WS, request(Some("PR-100")))
            .await
            .unwrap();
        assert_eq!(response.no_pr, "PR-100");

        let rows = store.snapshot(WS);
        assert_eq!(rows.len(), 2);
        let row = &rows[1];
        assert_eq!(row.len(), columns::WIDTH);
        assert_eq!(row[columns::NO_PR], "PR-100");
        assert_eq!(row[columns::QTY], "4");
        assert_eq!(row[columns::STATUS], STATUS_PR_CREATED);
        assert_eq!(row[columns::NO_PO], "");
        assert_eq!(row[columns::TANGGAL_RECEIPT], "");
        assert_eq!(row[columns::KANBAN_TYPE], "INTERNAL");
    }

    #[tokio::test]
    async fn test_create_pr_generates_pr_number() {
        let store = InMemorySheetsStore::new();
        store.seed(WS, vec![tracking_header()]);
        let response = create_pr(&store, WS, request(None)).await.unwrap();
        assert!(response.no_pr.starts_with("PR-"));
    }

    #[tokio::test]
    async fn test_create_pr_requires_code_part() {
        let store = InMemorySheetsStore::new();
        let mut bad = request(None);
        bad.code_part = "  ".into();
        let err = create_pr(&store, WS, bad).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(store.snapshot(WS).is_empty());
    }

    #[tokio::test]
    async fn test_update_locates_row_just_created() {
        let store = InMemorySheetsStore::new();
        store.seed(WS, vec![tracking_header()]);
        create_pr(&store, WS, request(Some("PR-200"))).await.unwrap();

        let payload: UpdateTrackingPayload = serde_json::from_str(
            r#"{"noPr": "PR-200", "po": "PO-31", "harga": 125000, "leadtime": 14}"#,
        )
        .unwrap();
        let response = update_tracking(&store, WS, payload).await.unwrap();
        assert_eq!(response.status.as_deref(), Some(STATUS_PO_SUBMITTED));

        let row = &store.snapshot(WS)[1];
        assert_eq!(row[columns::NO_PO], "PO-31");
        assert_eq!(row[columns::HARGA], "125000");
        assert_eq!(row[columns::LEADTIME], "14");
        assert_eq!(row[columns::STATUS], STATUS_PO_SUBMITTED);
    }

    #[tokio::test]
    async fn test_update_receipt_completes_and_stamps() {
        let store = InMemorySheetsStore::new();
        store.seed(WS, vec![tracking_header()]);
        create_pr(&store, WS, request(Some("PR-300"))).await.unwrap();

        let payload: UpdateTrackingPayload = serde_json::from_str(
            r#"{"noPr": "PR-300", "tanggalreceipt": "2025-03-01", "noreceipt": "RCP-7"}"#,
        )
        .unwrap();
        let response = update_tracking(&store, WS, payload).await.unwrap();
        assert_eq!(response.status.as_deref(), Some(STATUS_COMPLETED));

        let row = &store.snapshot(WS)[1];
        assert_eq!(row[columns::TANGGAL_RECEIPT], "2025-03-01");
        assert_eq!(row[columns::NO_RECEIPT], "RCP-7");
        assert_eq!(row[columns::STATUS], STATUS_COMPLETED);
        assert!(!row[columns::TANGGAL_SELESAI].is_empty());
    }

    #[tokio::test]
    async fn test_update_explicit_status_suppresses_auto_advance() {
        let store = InMemorySheetsStore::new();
        store.seed(WS, vec![tracking_header()]);
        create_pr(&store, WS, request(Some("PR-400"))).await.unwrap();

        let payload: UpdateTrackingPayload = serde_json::from_str(
            r#"{"noPr": "PR-400", "tanggalreceipt": "2025-03-01", "status": "Cek QC"}"#,
        )
        .unwrap();
        update_tracking(&store, WS, payload).await.unwrap();

        let row = &store.snapshot(WS)[1];
        assert_eq!(row[columns::STATUS], "Cek QC");
        assert_eq!(row[columns::TANGGAL_SELESAI], "");
    }

    #[tokio::test]
    async fn test_update_unknown_pr_mutates_nothing() {
        let store = InMemorySheetsStore::new();
        store.seed(WS, vec![tracking_header()]);
        create_pr(&store, WS, request(Some("PR-500"))).await.unwrap();
        let before = store.snapshot(WS);

        let payload: UpdateTrackingPayload =
            serde_json::from_str(r#"{"noPr": "PR-999", "po": "PO-1"}"#).unwrap();
        let err = update_tracking(&store, WS, payload).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(store.snapshot(WS), before);
    }

    #[tokio::test]
    async fn test_update_empty_payload_is_bad_request() {
        let store = InMemorySheetsStore::new();
        store.seed(WS, vec![tracking_header()]);
        let payload: UpdateTrackingPayload =
            serde_json::from_str(r#"{"noPr": "PR-1"}"#).unwrap();
        let err = update_tracking(&store, WS, payload).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_duplicate_pr_numbers_update_first_row() {
        let store = InMemorySheetsStore::new();
        store.seed(WS, vec![tracking_header()]);
        create_pr(&store, WS, request(Some("PR-600"))).await.unwrap();
        create_pr(&store, WS, request(Some("PR-600"))).await.unwrap();

        let payload: UpdateTrackingPayload =
            serde_json::from_str(r#"{"noPr": "PR-600", "po": "PO-X"}"#).unwrap();
        update_tracking(&store, WS, payload).await.unwrap();

        let rows = store.snapshot(WS);
        assert_eq!(rows[1][columns::NO_PO], "PO-X");
        assert_eq!(rows[2][columns::NO_PO], "");
    }
}
