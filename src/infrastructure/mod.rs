pub mod backends;
pub mod share;
