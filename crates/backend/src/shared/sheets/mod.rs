pub mod a1;
pub mod google;
pub mod grid;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

/// One targeted cell write, addressed absolutely within a worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    /// A1 address, e.g. "L5"
    pub a1: String,
    pub value: String,
}

impl CellUpdate {
    pub fn new(a1: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            a1: a1.into(),
            value: value.into(),
        }
    }
}

/// Storage seam over the spreadsheet backend.
///
/// Mirrors the three operations the remote values API offers: ranged read,
/// row append and batched cell updates. Implementations do not cache —
/// every call goes straight to the backend, and updates addressed by row
/// position can land on the wrong row if another writer inserted rows
/// between a read and the write.
#[async_trait]
pub trait SheetsStore: Send + Sync {
    /// Read a cell range (A1 notation, without the worksheet prefix) as a
    /// grid of strings. Missing trailing cells are simply absent.
    async fn get_rows(&self, worksheet: &str, range: &str) -> anyhow::Result<Vec<Vec<String>>>;

    /// Append one row after the last data row of the worksheet
    async fn append_row(&self, worksheet: &str, row: Vec<String>) -> anyhow::Result<()>;

    /// Write a batch of single cells; all-or-nothing at the transport level
    async fn update_cells(&self, worksheet: &str, updates: Vec<CellUpdate>)
        -> anyhow::Result<()>;
}
