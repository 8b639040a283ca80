pub mod reliability;
pub mod summary;
