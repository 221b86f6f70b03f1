pub mod enrich;
pub mod nutrition;
