pub mod bootstrapper;
pub mod error;
pub mod installer;

pub use bootstrapper::Bootstrapper;
