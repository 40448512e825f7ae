// Adapters layer: concrete implementations of the domain ports (processes, file system).

pub mod process;
pub mod storage;

pub use process::{DryRunRunner, ProcessRunner};
pub use storage::LocalStorage;
