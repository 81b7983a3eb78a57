pub mod button;
pub mod card;
pub mod code_block;
pub mod form;
pub mod textarea;

pub use button::*;
pub use card::*;
pub use code_block::*;
pub use form::*;
pub use textarea::*;
