/*!
The backend crate holds everything the social API test harness does over the network:
the GraphQL document registry and API client, identity provisioning, the login cache handing
out isolated test identities, polling for eventually consistent state, realtime subscriptions,
uploads and the local dev server
*/

#![forbid(unsafe_code)]

pub mod api;
pub mod dev;
pub mod errors;
pub mod identity;
pub mod login;
pub mod poll;

#[cfg(test)]
mod test_support;
