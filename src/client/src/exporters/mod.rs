pub mod http_forward;
pub mod transport;

pub use http_forward::HttpForward;
pub use transport::{Transport, TransportEnum};
