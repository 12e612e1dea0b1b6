use serde::{Deserialize, Serialize};

/// Kanban board variant: parts reordered from the site's own warehouse
/// (internal) or from outside suppliers (external)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KanbanType {
    Internal,
    External,
}

impl KanbanType {
    pub fn code(&self) -> &'static str {
        match self {
            KanbanType::Internal => "INTERNAL",
            KanbanType::External => "EXTERNAL",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            KanbanType::Internal => "Kanban Internal",
            KanbanType::External => "Kanban External",
        }
    }

    /// Lenient parse: accepts any casing and surrounding whitespace
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "internal" => Some(KanbanType::Internal),
            "external" | "eksternal" => Some(KanbanType::External),
            _ => None,
        }
    }
}

impl Default for KanbanType {
    fn default() -> Self {
        KanbanType::Internal
    }
}

impl ToString for KanbanType {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_lenient() {
        assert_eq!(KanbanType::from_code("internal"), Some(KanbanType::Internal));
        assert_eq!(KanbanType::from_code(" EXTERNAL "), Some(KanbanType::External));
        assert_eq!(KanbanType::from_code("eksternal"), Some(KanbanType::External));
        assert_eq!(KanbanType::from_code("both"), None);
    }
}
