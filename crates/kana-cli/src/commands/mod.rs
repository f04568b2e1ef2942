pub mod session_ops;
pub mod table_ops;
