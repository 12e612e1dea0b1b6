use contracts::domain::a002_inventory::{
    SheetDebugInfo, SheetRowsResponse, UpdateCellResponse,
};

use crate::shared::error::ApiError;
use crate::shared::sheets::{a1, grid, CellUpdate, SheetsStore};

/// Default read window; inventory worksheets never grow past this in practice
pub const DEFAULT_RANGE: &str = "A1:Z1000";

/// Header spellings under which the part code has appeared historically
pub const PART_CODE_ALIASES: &[&str] = &["kodepart", "kode_part", "kode", "part_code", "code_part"];

/// Header spellings of the free-text status column
pub const STATUS_ALIASES: &[&str] = &["status", "status_kanban"];

const MACHINE_ALIASES: &[&str] = &["mesin", "machine"];
const LAST_REPLACEMENT_KEY: &str = "tanggal_penggantian_terakhir";

/// Read a worksheet and return its normalized rows, optionally filtered by
/// machine and status (case-insensitive substring match).
pub async fn list(
    store: &dyn SheetsStore,
    worksheet: &str,
    range: Option<&str>,
    machine: Option<&str>,
    status: Option<&str>,
) -> Result<SheetRowsResponse, ApiError> {
    let range = range
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_RANGE);
    let raw = store.get_rows(worksheet, range).await?;
    let records = grid::normalize_grid(&raw);
    let row_count = records.len();

    let data: Vec<_> = records
        .into_iter()
        .filter(|record| {
            matches_filter(record, MACHINE_ALIASES, machine)
                && matches_filter(record, STATUS_ALIASES, status)
        })
        .map(|record| {
            let mut fields = record.fields;
            fields.insert(
                "sheet_row_number".to_string(),
                record.sheet_row_number.to_string(),
            );
            fields
        })
        .collect();

    Ok(SheetRowsResponse {
        success: true,
        debug: SheetDebugInfo {
            worksheet: worksheet.to_string(),
            range: range.to_string(),
            row_count,
            filtered_count: data.len(),
        },
        data,
    })
}

fn matches_filter(record: &grid::SheetRecord, aliases: &[&str], needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record.first_of(aliases).to_lowercase().contains(&needle)
}

/// Stamp the last-replacement date of one part.
///
/// The target row is found by part code (trimmed, case-insensitive); with
/// duplicate codes the last matching row wins, mirroring how lookups
/// collapse duplicates elsewhere. The row number is captured from this
/// read, so a concurrent row insert can shift the target before the write
/// lands — a property of the backing store, not guarded against here.
pub async fn update_last_replacement(
    store: &dyn SheetsStore,
    worksheet: &str,
    kode_part: &str,
    tanggal: &str,
) -> Result<UpdateCellResponse, ApiError> {
    let raw = store.get_rows(worksheet, DEFAULT_RANGE).await?;
    let Some((header_index, keys)) = grid::find_header(&raw) else {
        return Err(ApiError::not_found(format!(
            "Worksheet {} kosong atau tidak memiliki header",
            worksheet
        )));
    };

    let part_column = keys
        .iter()
        .position(|key| PART_CODE_ALIASES.contains(&key.as_str()))
        .ok_or_else(|| ApiError::not_found("Kolom kode part tidak ditemukan".to_string()))?;
    let date_column = keys
        .iter()
        .position(|key| key == LAST_REPLACEMENT_KEY)
        .ok_or_else(|| {
            ApiError::not_found("Kolom tanggal penggantian terakhir tidak ditemukan".to_string())
        })?;

    let wanted = kode_part.trim().to_lowercase();
    let mut target_row = None;
    for (index, row) in raw.iter().enumerate().skip(header_index + 1) {
        let code = row.get(part_column).map(|c| c.trim().to_lowercase());
        if code.as_deref() == Some(wanted.as_str()) {
            target_row = Some(index + 1);
        }
    }
    let Some(row_number) = target_row else {
        return Err(ApiError::not_found(format!(
            "Kode part {} tidak ditemukan di {}",
            kode_part, worksheet
        )));
    };

    let cell = a1::cell(date_column, row_number);
    store
        .update_cells(worksheet, vec![CellUpdate::new(cell.clone(), tanggal)])
        .await?;

    Ok(UpdateCellResponse {
        success: true,
        worksheet: worksheet.to_string(),
        kode_part: kode_part.to_string(),
        updated_cell: cell,
    })
}
