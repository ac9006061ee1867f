mod chat_request;
mod chat_response;

pub use chat_request::*;
pub use chat_response::*;
