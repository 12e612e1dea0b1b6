use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body for a usage-ledger append (POST /api/kanban with usage fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecordRequest {
    /// Usage date; defaults to today when absent
    #[serde(default)]
    pub tanggal: Option<String>,
    #[serde(default)]
    pub kanban_type: Option<String>,
    pub kode_part: String,
    #[serde(default)]
    pub part: Option<String>,
    pub qty: serde_json::Value,
    #[serde(default)]
    pub keterangan: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordUsageResponse {
    pub success: bool,
    pub worksheet: String,
}

/// One month section of the usage ledger. Rows belong to the most recent
/// month-marker row seen above them in the sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageMonthGroup {
    pub month: String,
    pub rows: Vec<HashMap<String, String>>,
}

/// Response for GET /api/pemakaian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageLogResponse {
    pub success: bool,
    pub months: Vec<UsageMonthGroup>,
}
