//! Route handlers.

pub mod delivery;
pub mod health;
pub mod order;

pub use delivery::*;
pub use health::*;
pub use order::*;
