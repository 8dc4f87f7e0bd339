/* src/server/client/graphql/src/lib.rs */

mod client;
mod documents;

pub use client::{CHANNEL_TOKEN_HEADER, DEFAULT_AUTH_TOKEN_HEADER, GraphqlBackend, GraphqlConfig};
