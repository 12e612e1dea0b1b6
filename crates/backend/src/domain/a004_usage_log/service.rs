use chrono::Utc;
use contracts::domain::a003_tracking::json_value_to_cell;
use contracts::domain::a004_usage_log::{
    RecordUsageResponse, UsageLogResponse, UsageMonthGroup, UsageRecordRequest,
};
use std::collections::HashMap;

use crate::shared::error::ApiError;
use crate::shared::sheets::{grid, SheetsStore};

const READ_RANGE: &str = "A1:H2000";

/// Append one row to the usage ledger. The ledger is independent of the
/// PR/PO lifecycle: nothing here touches tracking rows.
pub async fn record_usage(
    store: &dyn SheetsStore,
    worksheet: &str,
    request: UsageRecordRequest,
) -> Result<RecordUsageResponse, ApiError> {
    if request.kode_part.trim().is_empty() {
        return Err(ApiError::bad_request("Kode part wajib diisi"));
    }
    let qty = json_value_to_cell(&request.qty);
    if qty.trim().is_empty() {
        return Err(ApiError::bad_request("Qty wajib diisi"));
    }

    let tanggal = request
        .tanggal
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

    let row = vec![
        tanggal,
        request.kanban_type.clone().unwrap_or_default(),
        request.kode_part.trim().to_string(),
        request.part.clone().unwrap_or_default(),
        qty,
        request.keterangan.clone().unwrap_or_default(),
        request.operator.clone().unwrap_or_default(),
    ];
    store.append_row(worksheet, row).await?;

    Ok(RecordUsageResponse {
        success: true,
        worksheet: worksheet.to_string(),
    })
}

/// Read the ledger grouped by its month-marker rows
pub async fn list_usage(
    store: &dyn SheetsStore,
    worksheet: &str,
) -> Result<UsageLogResponse, ApiError> {
    let raw = store.get_rows(worksheet, READ_RANGE).await?;
    Ok(UsageLogResponse {
        success: true,
        months: group_by_month(&raw),
    })
}

/// Group ledger rows under the most recent month-marker row above them.
/// A marker row carries text in its first column and nothing anywhere
/// else; rows above the first marker land in an unnamed group.
fn group_by_month(raw: &[Vec<String>]) -> Vec<UsageMonthGroup> {
    let Some((header_index, keys)) = grid::find_header(raw) else {
        return Vec::new();
    };

    let mut groups: Vec<UsageMonthGroup> = Vec::new();
    for row in raw.iter().skip(header_index + 1) {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let first = row.first().map(|c| c.trim()).unwrap_or("");
        let is_marker = !first.is_empty() && row.iter().skip(1).all(|cell| cell.trim().is_empty());
        if is_marker {
            groups.push(UsageMonthGroup {
                month: first.to_string(),
                rows: Vec::new(),
            });
            continue;
        }

        let mut fields = HashMap::new();
        for (column, key) in keys.iter().enumerate() {
            if key.is_empty() {
                continue;
            }
            fields.insert(key.clone(), row.get(column).cloned().unwrap_or_default());
        }
        if groups.is_empty() {
            groups.push(UsageMonthGroup {
                month: String::new(),
                rows: Vec::new(),
            });
        }
        if let Some(group) = groups.last_mut() {
            group.rows.push(fields);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::sheets::memory::InMemorySheetsStore;

    const WS: &str = "Pemakaian";

    fn ledger() -> Vec<Vec<String>> {
        let to_row = |cells: &[&str]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        vec![
            to_row(&[
                "Tanggal",
                "Kanban Type",
                "Kode Part",
                "Part",
                "Qty",
                "Keterangan",
                "Operator",
            ]),
            to_row(&["Januari 2025", "", "", "", "", "", ""]),
            to_row(&["2025-01-03", "INTERNAL", "P-01", "Bearing", "2", "", "Andi"]),
            to_row(&["2025-01-20", "EXTERNAL", "P-02", "V-Belt", "1", "rusak", "Budi"]),
            to_row(&["Februari 2025", "", "", "", "", "", ""]),
            to_row(&["2025-02-02", "INTERNAL", "P-01", "Bearing", "3", "", "Andi"]),
        ]
    }

    #[test]
    fn test_group_by_month() {
        let groups = group_by_month(&ledger());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].month, "Januari 2025");
        assert_eq!(groups[0].rows.len(), 2);
        assert_eq!(groups[0].rows[1]["keterangan"], "rusak");
        assert_eq!(groups[1].month, "Februari 2025");
        assert_eq!(groups[1].rows[0]["qty"], "3");
    }

    #[test]
    fn test_rows_before_first_marker_form_unnamed_group() {
        let mut rows = ledger();
        rows.remove(1); // drop the Januari marker
        let groups = group_by_month(&rows);
        assert_eq!(groups[0].month, "");
        assert_eq!(groups[0].rows.len(), 2);
    }

    #[tokio::test]
    async fn test_record_usage_appends_ledger_row() {
        let store = InMemorySheetsStore::new();
        store.seed(WS, ledger());
        let request: UsageRecordRequest = serde_json::from_str(
            r#"{"tanggal": "2025-02-10", "kanbanType": "INTERNAL",
                "kodePart": "P-03", "part": "Seal Kit", "qty": 1,
                "keterangan": "ganti rutin", "operator": "Citra"}"#,
        )
        .unwrap();
        record_usage(&store, WS, request).await.unwrap();

        let rows = store.snapshot(WS);
        let last = rows.last().unwrap();
        assert_eq!(last[2], "P-03");
        assert_eq!(last[4], "1");
        assert_eq!(last[6], "Citra");
    }

    #[tokio::test]
    async fn test_record_usage_requires_qty() {
        let store = InMemorySheetsStore::new();
        let request: UsageRecordRequest =
            serde_json::from_str(r#"{"kodePart": "P-03", "qty": ""}"#).unwrap();
        let err = record_usage(&store, WS, request).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
