pub mod attr_type;
pub mod attrs;
pub mod constants;
pub mod error;
pub mod header;
pub mod nat;
pub mod packet;
pub mod request;
pub mod response;
pub mod util;

pub use attr_type::{AttrType, Comprehension};
pub use error::{Error, Result};
pub use header::{Header, TransId};
pub use request::{marshal_request, unmarshal_request, Request};
pub use response::{build_synthetic_response, unmarshal_response, Response};
