pub mod memory;
pub mod traits;

// Re-export
pub use memory::InMemoryWorkloadStore;
pub use traits::WorkloadRepository;
