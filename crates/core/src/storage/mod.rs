pub mod repository;

// Repository implementations
pub mod json_file;
pub mod memory;
