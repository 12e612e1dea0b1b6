//! In-memory stand-in for the spreadsheet backend, used by service tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{a1, CellUpdate, SheetsStore};

#[derive(Default)]
pub struct InMemorySheetsStore {
    sheets: Mutex<HashMap<String, Vec<Vec<String>>>>,
}

impl InMemorySheetsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a worksheet's grid wholesale
    pub fn seed(&self, worksheet: &str, rows: Vec<Vec<String>>) {
        self.sheets
            .lock()
            .expect("sheets lock poisoned")
            .insert(worksheet.to_string(), rows);
    }

    /// Current grid of a worksheet (empty if the worksheet does not exist)
    pub fn snapshot(&self, worksheet: &str) -> Vec<Vec<String>> {
        self.sheets
            .lock()
            .expect("sheets lock poisoned")
            .get(worksheet)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl SheetsStore for InMemorySheetsStore {
    // The range argument is accepted but not sliced; fixtures are small
    // enough that the whole grid stands in for any requested range.
    async fn get_rows(&self, worksheet: &str, _range: &str) -> anyhow::Result<Vec<Vec<String>>> {
        Ok(self.snapshot(worksheet))
    }

    async fn append_row(&self, worksheet: &str, row: Vec<String>) -> anyhow::Result<()> {
        self.sheets
            .lock()
            .expect("sheets lock poisoned")
            .entry(worksheet.to_string())
            .or_default()
            .push(row);
        Ok(())
    }

    async fn update_cells(
        &self,
        worksheet: &str,
        updates: Vec<CellUpdate>,
    ) -> anyhow::Result<()> {
        let mut sheets = self.sheets.lock().expect("sheets lock poisoned");
        let grid = sheets.entry(worksheet.to_string()).or_default();
        for update in updates {
            let (column, row) = a1::parse_cell(&update.a1)
                .ok_or_else(|| anyhow::anyhow!("Invalid cell address: {}", update.a1))?;
            if grid.len() < row {
                grid.resize(row, Vec::new());
            }
            let cells = &mut grid[row - 1];
            if cells.len() <= column {
                cells.resize(column + 1, String::new());
            }
            cells[column] = update.value;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_read_back() {
        let store = InMemorySheetsStore::new();
        store
            .append_row("Sheet1", vec!["a".into(), "b".into()])
            .await
            .unwrap();
        let rows = store.get_rows("Sheet1", "A1:Z10").await.unwrap();
        assert_eq!(rows, vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[tokio::test]
    async fn test_update_cells_grows_grid() {
        let store = InMemorySheetsStore::new();
        store
            .update_cells("Sheet1", vec![CellUpdate::new("C2", "x")])
            .await
            .unwrap();
        let rows = store.snapshot("Sheet1");
        assert_eq!(rows[1][2], "x");
    }
}
