//! Infrastructure adapters for the ledger engine
//!
//! Currently a single adapter: the in-memory [`MemoryStore`], which is
//! the reference implementation of the
//! [`LedgerStore`](domain_ledger::LedgerStore) port and the backing for
//! the integration test suites.

pub mod memory;

pub use memory::MemoryStore;
