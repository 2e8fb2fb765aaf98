// Service exports
pub mod ledger;
pub mod matching;
pub mod memory;
pub mod queries;
pub mod store;

pub use ledger::SwipeLedger;
pub use matching::{MatchingError, MatchingService};
pub use memory::MemoryStore;
pub use queries::MatchQueries;
pub use store::{MatchInsert, MatchStore, StoreError};
