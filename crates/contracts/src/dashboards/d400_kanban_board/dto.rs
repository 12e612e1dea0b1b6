use crate::enums::kanban_status::KanbanStatus;
use crate::enums::kanban_type::KanbanType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One merged inventory+tracking card on the kanban board.
///
/// `fields` carries every sheet column of the inventory row, overlaid by the
/// columns of the selected tracking row; the commonly-renamed procurement
/// fields are additionally lifted into fixed names so the board does not
/// have to know each sheet's header spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanbanCard {
    pub kanban_status: KanbanStatus,
    pub no_pr: String,
    pub tanggal_pr: String,
    pub no_po: String,
    pub tanggal_po: String,
    pub tanggal_receipt: String,
    pub no_receipt: String,
    /// 1-based spreadsheet row of the inventory record
    pub sheet_row_number: usize,
    #[serde(flatten)]
    pub fields: HashMap<String, String>,
}

/// Response for GET /api/kanban
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanbanBoardResponse {
    pub success: bool,
    pub kanban_type: KanbanType,
    pub data: Vec<KanbanCard>,
}

/// Response for GET /api/kanban/summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanbanSummaryResponse {
    pub success: bool,
    pub kanban_type: KanbanType,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub ignore: usize,
    pub total: usize,
}
