pub mod assistant_handlers;
pub mod system_handlers;

pub use assistant_handlers::*;
pub use system_handlers::*;
