//! Helpers for network tests that a mock server cannot express.

use std::net::TcpListener;

use url::Url;

/// A URL on a localhost port with nothing listening.
pub(crate) fn closed_port() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/", addr)).unwrap()
}
