pub mod mock;
pub mod seed;
pub mod tokens;
