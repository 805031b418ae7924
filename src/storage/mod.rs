//! Record store and snapshot backends

pub mod in_memory;
pub mod json_file;
pub mod record_store;
pub mod sample;

pub use in_memory::InMemorySnapshotStore;
pub use json_file::JsonFileSnapshotStore;
pub use record_store::RecordStore;
pub use sample::SampleGenerator;
