pub mod http;

pub use http::HttpIngress;
