//! Command implementations

mod call;
mod serve;
mod session;
mod stats;
mod tools;

pub use call::call;
pub use serve::serve;
pub use session::Session;
pub use stats::stats;
pub use tools::tools;
