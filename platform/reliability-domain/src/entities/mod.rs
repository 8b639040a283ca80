pub mod reliability_table;
