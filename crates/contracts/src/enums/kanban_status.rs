use serde::{Deserialize, Serialize};

/// Derived workflow status of a spare part on the kanban board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KanbanStatus {
    NotStarted,
    InProgress,
    Completed,
    Ignore,
}

impl KanbanStatus {
    /// Wire code of the status
    pub fn code(&self) -> &'static str {
        match self {
            KanbanStatus::NotStarted => "not_started",
            KanbanStatus::InProgress => "in_progress",
            KanbanStatus::Completed => "completed",
            KanbanStatus::Ignore => "ignore",
        }
    }

    /// Label shown on the board
    pub fn display_name(&self) -> &'static str {
        match self {
            KanbanStatus::NotStarted => "Belum Dipesan",
            KanbanStatus::InProgress => "Dalam Proses",
            KanbanStatus::Completed => "Sudah Diterima",
            KanbanStatus::Ignore => "-",
        }
    }

    pub fn all() -> Vec<KanbanStatus> {
        vec![
            KanbanStatus::NotStarted,
            KanbanStatus::InProgress,
            KanbanStatus::Completed,
            KanbanStatus::Ignore,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "not_started" => Some(KanbanStatus::NotStarted),
            "in_progress" => Some(KanbanStatus::InProgress),
            "completed" => Some(KanbanStatus::Completed),
            "ignore" => Some(KanbanStatus::Ignore),
            _ => None,
        }
    }
}

impl ToString for KanbanStatus {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}

/// Marker phrases that flag an inventory row as needing a new order.
/// Single table shared by every route that classifies statuses.
pub const NEEDS_ORDERING_MARKERS: &[&str] = &["segera pesan", "perlu pesan", "order now"];

/// Marker phrases for a finished procurement cycle.
/// The bare word "diterima" must not appear here: it would also match
/// "belum diterima", which is an in-progress stage.
pub const COMPLETED_MARKERS: &[&str] = &["sudah diterima", "selesai", "received", "complete"];

/// Marker phrases for a procurement cycle that has been started
pub const IN_PROGRESS_MARKERS: &[&str] = &[
    "pr dibuat",
    "pr process",
    "po sudah dibuat",
    "po submitted",
    "menunggu barang",
    "belum diterima",
    "on order",
];

fn contains_any(text: &str, markers: &[&str]) -> bool {
    let text = text.trim().to_lowercase();
    markers.iter().any(|marker| text.contains(marker))
}

/// Classify a part's kanban status from free-text status labels.
///
/// `tracking_status` is the status of the most recent matching tracking row,
/// if one exists; `inventory_status` is only consulted when there is no
/// tracking row. The checks are substring matches on free text, so this is
/// a heuristic classifier rather than a state machine.
pub fn classify(inventory_status: &str, tracking_status: Option<&str>) -> KanbanStatus {
    match tracking_status {
        None => {
            if contains_any(inventory_status, NEEDS_ORDERING_MARKERS) {
                KanbanStatus::NotStarted
            } else {
                KanbanStatus::Ignore
            }
        }
        Some(tracking) => {
            if contains_any(tracking, COMPLETED_MARKERS) {
                KanbanStatus::Completed
            } else if contains_any(tracking, IN_PROGRESS_MARKERS) {
                KanbanStatus::InProgress
            } else {
                KanbanStatus::Ignore
            }
        }
    }
}
