pub mod ledger;
pub mod relation_ops;
pub mod store;

pub use ledger::{Direction, RelationLedger};
pub use relation_ops::{block, block_at, block_list, follow, follow_at, followers, following, relation_users};
pub use store::Store;
