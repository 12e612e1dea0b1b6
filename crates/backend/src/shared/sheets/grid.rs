//! Turns raw sheet grids into records keyed by normalized header names.

use std::collections::HashMap;

/// One data row of a worksheet, keyed by normalized header name
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRecord {
    pub fields: HashMap<String, String>,
    /// 1-based spreadsheet row this record is assumed to live on.
    /// Advances only over retained (non-blank) rows, so it can drift from
    /// the real sheet position when blank rows sit between data rows.
    pub sheet_row_number: usize,
}

impl SheetRecord {
    /// Value under a key; missing keys read as empty
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// Value under the first alias that carries a non-empty value
    pub fn first_of(&self, aliases: &[&str]) -> &str {
        for alias in aliases {
            let value = self.get(alias);
            if !value.trim().is_empty() {
                return value;
            }
        }
        ""
    }
}

/// Normalize a raw header cell into a record key: lowercase, trimmed,
/// internal whitespace runs collapsed to `_`, everything outside
/// `[a-z0-9_]` removed. "Kode Part" and "kode_part" both yield "kode_part".
pub fn normalize_key(raw: &str) -> String {
    let mut key = String::new();
    let mut pending_separator = false;
    for ch in raw.trim().to_lowercase().chars() {
        if ch.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_') {
            continue;
        }
        if pending_separator && !key.is_empty() {
            key.push('_');
        }
        pending_separator = false;
        key.push(ch);
    }
    key
}

/// Locate the header row: the first row with at least one alphanumeric
/// cell. Returns its 0-based index and the normalized keys in column order.
pub fn find_header(grid: &[Vec<String>]) -> Option<(usize, Vec<String>)> {
    let index = grid.iter().position(|row| {
        row.iter()
            .any(|cell| cell.chars().any(|c| c.is_ascii_alphanumeric()))
    })?;
    let keys = grid[index].iter().map(|cell| normalize_key(cell)).collect();
    Some((index, keys))
}

/// Convert a raw grid into normalized records.
///
/// Rows before the header are discarded; data rows that are entirely blank
/// are dropped. Keys are not deduplicated — when two header cells normalize
/// to the same key, the later column's value wins. Output order matches
/// input order.
pub fn normalize_grid(grid: &[Vec<String>]) -> Vec<SheetRecord> {
    let Some((header_index, keys)) = find_header(grid) else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for row in grid.iter().skip(header_index + 1) {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut fields = HashMap::new();
        for (column, key) in keys.iter().enumerate() {
            if key.is_empty() {
                continue;
            }
            let value = row.get(column).cloned().unwrap_or_default();
            fields.insert(key.clone(), value);
        }
        records.push(SheetRecord {
            fields,
            sheet_row_number: header_index + 2 + records.len(),
        });
    }
    records
}
