pub mod codec;
pub mod query;
