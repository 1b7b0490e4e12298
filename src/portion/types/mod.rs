pub mod request;
pub mod response;

pub use request::{PortionKey, PortionRequest};
pub use response::{FLAT_PORTION_BPS, FLAT_PORTION_RECIPIENT, Portion, PortionResponse};
