//! Shared test servers for the integration tests

pub mod test_server;
pub mod upstream;

#[allow(unused_imports)]
pub use test_server::TestServer;
#[allow(unused_imports)]
pub use upstream::FakeUpstream;
