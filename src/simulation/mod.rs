pub mod errors;
pub mod spawning;
pub mod steering;

pub use errors::*;
pub use spawning::*;
pub use steering::*;
