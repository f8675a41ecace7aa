pub mod policy;
pub mod progress;

pub use policy::*;
pub use progress::*;
