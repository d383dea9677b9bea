//! Headless CMS access
//!
//! The catalog lives in a Payload CMS instance reached over GraphQL.
//! [`endpoint`] decides where that instance is, [`client`] talks to it,
//! [`payload`] holds the raw document shapes it returns and [`images`]
//! turns its media references into absolute URLs.

pub mod client;
pub mod contact;
pub mod endpoint;
pub mod images;
pub mod payload;
pub mod queries;

pub use client::{http_agent, CmsClient, GraphqlClient};
pub use contact::{ContactRelay, ContactRequest, RelayResponse};
pub use endpoint::CmsEndpoint;
pub use images::{CmsImageResolver, ImageResolver};

#[cfg(test)]
pub(crate) mod testing {
    use std::net::TcpListener;

    /// URL of a local port with nothing listening on it
    pub fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }
}
