pub mod macros;
pub mod event;
pub mod review;

pub use event::*;
pub use review::*;
