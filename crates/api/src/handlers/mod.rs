pub mod artifact;
pub mod operation_log;
pub mod version;
