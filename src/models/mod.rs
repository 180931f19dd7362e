pub mod branch;
pub mod order;

pub use branch::Branch;
pub use order::{Order, OrderItem, ProductQuantities, TOTAL_BRANCH_ID, TOTAL_BRANCH_NAME};
