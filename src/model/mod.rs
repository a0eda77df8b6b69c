pub mod filter;
pub mod record;
pub mod status;
