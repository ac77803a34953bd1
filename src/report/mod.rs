//! Result tables and CSV export

mod table;
pub mod export;

pub use table::{ResultRow, ResultTable, EntityTable};
pub use export::{write_csv, write_csv_file, to_csv_bytes, export_file_name};
