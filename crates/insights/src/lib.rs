pub mod views;
pub mod summary;

pub use views::*;
pub use summary::*;
