mod data_tables;
pub mod sankey;

pub use data_tables::DataTables;
