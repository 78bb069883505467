pub mod document;
pub mod morphology;
pub mod token;

pub use document::*;
pub use morphology::*;
pub use token::*;
