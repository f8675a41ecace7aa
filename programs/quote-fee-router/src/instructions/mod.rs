pub mod create_policy;
pub mod create_progress;
pub mod open_day;
pub mod submit_page;
pub mod close_day;

pub use create_policy::*;
pub use create_progress::*;
pub use open_day::*;
pub use submit_page::*;
pub use close_day::*;
