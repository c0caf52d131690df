pub mod picture_ops;
pub mod run_ops;
