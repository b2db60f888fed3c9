pub mod image;
pub mod provider;
pub mod request;
pub mod result;

pub use image::*;
pub use provider::*;
pub use request::*;
pub use result::*;
