mod database;
mod filter;

pub use database::load_database_config;
pub use filter::build_filter_query;
