//! Debounced incremental product search

pub mod debounce;
pub mod filter;
pub mod session;

pub use debounce::{DebounceHandle, Debouncer};
pub use filter::suggest;
pub use session::{SearchCorpus, SearchPhase, SearchSession, SearchView};
