#[cynic::schema("social")]
pub mod schema {}

pub mod enums;
pub mod fragments;
pub mod mutations;
pub mod queries;
pub mod scalars;
pub mod subscriptions;
