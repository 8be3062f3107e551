pub mod get_cfo_audit;
pub mod read_memory;
pub mod write_memory;
