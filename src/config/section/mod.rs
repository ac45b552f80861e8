//! Configuration sections of `cinema.toml`.

mod seed;
mod storage;

pub use seed::SeedConfig;
pub use storage::StorageConfig;
