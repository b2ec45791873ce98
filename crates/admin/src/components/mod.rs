//! Building blocks shared by the manager tables.

pub mod data_table;
