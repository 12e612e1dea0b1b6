use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response for GET /api/sheets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetRowsResponse {
    pub success: bool,
    /// Normalized rows, keyed by normalized header name
    pub data: Vec<HashMap<String, String>>,
    pub debug: SheetDebugInfo,
}

/// Diagnostic block echoed back with every sheet read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDebugInfo {
    pub worksheet: String,
    pub range: String,
    /// Rows parsed out of the raw grid, before filters
    pub row_count: usize,
    /// Rows remaining after machine/status filters
    pub filtered_count: usize,
}

/// Body for PATCH /api/sheets — stamps the last replacement date of one part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReplacementDateRequest {
    #[serde(rename = "tanggalPenggantianTerakhir")]
    pub tanggal_penggantian_terakhir: String,
}

/// Response for PATCH /api/sheets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCellResponse {
    pub success: bool,
    pub worksheet: String,
    pub kode_part: String,
    /// A1 address of the cell that was written
    pub updated_cell: String,
}
