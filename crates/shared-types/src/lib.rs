pub mod background;
pub mod error;
pub mod feature_flags;

pub use background::*;
pub use error::*;
pub use feature_flags::*;
