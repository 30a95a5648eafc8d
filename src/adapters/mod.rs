// Adapters layer: concrete implementations of the domain ports for local
// use. Anything networked or shared lives behind the same traits.

pub mod broker;
pub mod extractor;
pub mod source;
pub mod storage;
pub mod store;

pub use broker::MemoryBroker;
pub use extractor::PlainTextExtractor;
pub use source::fetch_remote_document;
pub use storage::LocalStorage;
pub use store::{JsonlStore, MemoryStore};
