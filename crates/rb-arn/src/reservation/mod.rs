mod details;
mod outcome;
mod request;

pub use details::*;
pub use outcome::*;
pub use request::*;
