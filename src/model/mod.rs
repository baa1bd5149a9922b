pub mod common;
pub mod record;
pub mod source;

pub use common::*;
pub use record::*;
pub use source::*;
