use serde::{Deserialize, Serialize};

/// Body for POST /api/sheets/create-pr (also accepted through POST /api/kanban)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrRequest {
    /// PR date; defaults to today when absent
    #[serde(default)]
    pub date: Option<String>,
    /// PR number; a timestamp-derived one is generated when absent
    #[serde(default)]
    pub no_pr: Option<String>,
    pub code_part: String,
    pub part: String,
    #[serde(default)]
    pub form_month: Option<String>,
    /// Quantity as entered on the form; numbers and strings both accepted
    #[serde(default)]
    pub quantity: Option<serde_json::Value>,
    #[serde(default)]
    pub uom: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub kanban_type: Option<String>,
}

/// Response for POST /api/sheets/create-pr
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrResponse {
    pub success: bool,
    pub no_pr: String,
    pub worksheet: String,
}

/// Inner payload of PATCH /api/kanban. Field names follow the form the
/// frontend posts: lowercase concatenated, except `noPr`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTrackingPayload {
    #[serde(rename = "noPr")]
    pub no_pr: String,
    #[serde(default)]
    pub po: Option<String>,
    #[serde(default)]
    pub tanggalpo: Option<String>,
    #[serde(default)]
    pub harga: Option<serde_json::Value>,
    #[serde(default)]
    pub leadtime: Option<serde_json::Value>,
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub tanggalreceipt: Option<String>,
    #[serde(default)]
    pub noreceipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateTrackingPayload {
    /// True when the request carries nothing to write
    pub fn is_empty(&self) -> bool {
        self.po.is_none()
            && self.tanggalpo.is_none()
            && self.harga.is_none()
            && self.leadtime.is_none()
            && self.eta.is_none()
            && self.tanggalreceipt.is_none()
            && self.noreceipt.is_none()
            && self.status.is_none()
    }
}

/// Body for PATCH /api/kanban
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTrackingRequest {
    pub payload: UpdateTrackingPayload,
}

/// Response for PATCH /api/kanban
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrackingResponse {
    pub success: bool,
    pub no_pr: String,
    /// Number of cells written by the batch update
    pub updated_cells: usize,
    /// Status after auto-advance, when one was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Render a JSON scalar the way it should land in a sheet cell
pub fn json_value_to_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_empty() {
        let payload: UpdateTrackingPayload =
            serde_json::from_str(r#"{"noPr": "PR-1"}"#).unwrap();
        assert!(payload.is_empty());

        let payload: UpdateTrackingPayload =
            serde_json::from_str(r#"{"noPr": "PR-1", "po": "PO-9"}"#).unwrap();
        assert!(!payload.is_empty());
    }

    #[test]
    fn test_json_value_to_cell() {
        assert_eq!(json_value_to_cell(&serde_json::json!("12")), "12");
        assert_eq!(json_value_to_cell(&serde_json::json!(12)), "12");
        assert_eq!(json_value_to_cell(&serde_json::json!(12.5)), "12.5");
        assert_eq!(json_value_to_cell(&serde_json::Value::Null), "");
    }

    #[test]
    fn test_create_pr_accepts_numeric_quantity() {
        let req: CreatePrRequest = serde_json::from_str(
            r#"{"codePart": "P-01", "part": "Bearing", "quantity": 4}"#,
        )
        .unwrap();
        assert_eq!(json_value_to_cell(req.quantity.as_ref().unwrap()), "4");
    }
}
