pub mod schema;
pub mod contact_repo;
pub mod social_repo;
