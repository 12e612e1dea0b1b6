use contracts::dashboards::d400_kanban_board::{
    KanbanBoardResponse, KanbanCard, KanbanSummaryResponse,
};
use contracts::enums::kanban_status::{classify, KanbanStatus};
use contracts::enums::kanban_type::KanbanType;

use crate::domain::a002_inventory::service::{DEFAULT_RANGE, PART_CODE_ALIASES, STATUS_ALIASES};
use crate::shared::error::ApiError;
use crate::shared::sheets::{grid, SheetsStore};

// Header spellings of the procurement fields across tracking worksheets.
// Resolved from the tracking row only, never from inventory columns.
const NO_PR_ALIASES: &[&str] = &["no_pr", "nopr", "pr"];
const TANGGAL_PR_ALIASES: &[&str] = &["tanggal_pr", "tanggalpr", "tgl_pr", "tanggal"];
const NO_PO_ALIASES: &[&str] = &["no_po", "nopo", "po"];
const TANGGAL_PO_ALIASES: &[&str] = &["tanggal_po", "tanggalpo", "tgl_po"];
const TANGGAL_RECEIPT_ALIASES: &[&str] =
    &["tanggal_receipt", "tanggalreceipt", "tgl_receipt", "receipt_date"];
const NO_RECEIPT_ALIASES: &[&str] = &["no_receipt", "noreceipt", "receipt"];

/// Build the merged kanban board for one type (internal/external)
pub async fn board(
    store: &dyn SheetsStore,
    inventory_worksheet: &str,
    tracking_worksheet: &str,
    kanban_type: KanbanType,
) -> Result<KanbanBoardResponse, ApiError> {
    let inventory = grid::normalize_grid(&store.get_rows(inventory_worksheet, DEFAULT_RANGE).await?);
    let tracking = grid::normalize_grid(&store.get_rows(tracking_worksheet, DEFAULT_RANGE).await?);
    Ok(KanbanBoardResponse {
        success: true,
        kanban_type,
        data: merge(&inventory, &tracking),
    })
}

/// Per-status counts over the merged board
pub async fn summary(
    store: &dyn SheetsStore,
    inventory_worksheet: &str,
    tracking_worksheet: &str,
    kanban_type: KanbanType,
) -> Result<KanbanSummaryResponse, ApiError> {
    let response = board(store, inventory_worksheet, tracking_worksheet, kanban_type).await?;
    let count = |status: KanbanStatus| {
        response
            .data
            .iter()
            .filter(|card| card.kanban_status == status)
            .count()
    };
    Ok(KanbanSummaryResponse {
        success: true,
        kanban_type,
        not_started: count(KanbanStatus::NotStarted),
        in_progress: count(KanbanStatus::InProgress),
        completed: count(KanbanStatus::Completed),
        ignore: count(KanbanStatus::Ignore),
        total: response.data.len(),
    })
}

/// Attach at most one "current" tracking row to each inventory row and
/// classify its kanban status.
///
/// "Current" is the last matching row in sheet order: the tracking sheet is
/// append-only in practice, so ordinal position stands in for recency.
/// Rows edited out of entry order will misclassify; there is no
/// timestamp-based tie-break.
pub fn merge(inventory: &[grid::SheetRecord], tracking: &[grid::SheetRecord]) -> Vec<KanbanCard> {
    inventory
        .iter()
        .map(|item| {
            let code = normalize_part_code(item.first_of(PART_CODE_ALIASES));
            let matched = if code.is_empty() {
                None
            } else {
                tracking
                    .iter()
                    .rev()
                    .find(|row| normalize_part_code(row.first_of(PART_CODE_ALIASES)) == code)
            };

            let kanban_status = classify(
                item.first_of(STATUS_ALIASES),
                matched.map(|row| row.first_of(STATUS_ALIASES)),
            );

            // tracking fields override inventory fields of the same name
            let mut fields = item.fields.clone();
            if let Some(row) = matched {
                for (key, value) in &row.fields {
                    fields.insert(key.clone(), value.clone());
                }
            }

            let pick = |aliases: &[&str]| {
                matched
                    .map(|row| row.first_of(aliases).to_string())
                    .unwrap_or_default()
            };

            KanbanCard {
                kanban_status,
                no_pr: pick(NO_PR_ALIASES),
                tanggal_pr: pick(TANGGAL_PR_ALIASES),
                no_po: pick(NO_PO_ALIASES),
                tanggal_po: pick(TANGGAL_PO_ALIASES),
                tanggal_receipt: pick(TANGGAL_RECEIPT_ALIASES),
                no_receipt: pick(NO_RECEIPT_ALIASES),
                sheet_row_number: item.sheet_row_number,
                fields,
            }
        })
        .collect()
}

fn normalize_part_code(code: &str) -> String {
    code.trim().to_lowercase()
}
