//! Repository implementations.

pub mod inmemory;
pub mod seed;

pub use inmemory::InMemoryChatRepository;
pub use seed::{SeedData, SeedError};
