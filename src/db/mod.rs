pub mod documents;
pub mod pool;

pub use documents::*;
pub use pool::create_pool;
