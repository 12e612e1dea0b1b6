//! Fixed column layout of the tracking worksheets (A..R).
//!
//! Targeted updates write by absolute cell address, so these positions are
//! part of the sheet contract: inserting a column in the spreadsheet
//! without adjusting this map corrupts every later write.

pub const TANGGAL_PR: usize = 0; // A
pub const NO_PR: usize = 1; // B
pub const KODE_PART: usize = 2; // C
pub const PART: usize = 3; // D
pub const BULAN_FORM: usize = 4; // E
pub const QTY: usize = 5; // F
pub const UOM: usize = 6; // G
pub const VENDOR: usize = 7; // H
pub const HARGA: usize = 8; // I
pub const LEADTIME: usize = 9; // J
pub const ETA: usize = 10; // K
pub const NO_PO: usize = 11; // L
pub const TANGGAL_PO: usize = 12; // M
pub const TANGGAL_RECEIPT: usize = 13; // N
pub const NO_RECEIPT: usize = 14; // O
pub const STATUS: usize = 15; // P
pub const TANGGAL_SELESAI: usize = 16; // Q
pub const KANBAN_TYPE: usize = 17; // R

/// Number of columns a freshly appended tracking row carries
pub const WIDTH: usize = 18;
