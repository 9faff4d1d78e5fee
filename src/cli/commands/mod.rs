pub mod batch;
pub mod classify;
