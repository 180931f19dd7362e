pub mod aggregator;
pub mod branches;
pub mod orders;
pub mod quantity;

pub use aggregator::RangeAggregator;
pub use branches::BranchService;
pub use orders::OrderService;
pub use quantity::{format_quantity, parse_quantity};
