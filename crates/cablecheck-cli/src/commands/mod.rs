pub mod alternatives;
pub mod min_size;
pub mod select;
pub mod tables;
pub mod validate;
pub mod validate_batch;
