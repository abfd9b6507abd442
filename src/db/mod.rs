pub mod entities;
pub mod enums;

pub use entities::*;
pub use enums::*;
