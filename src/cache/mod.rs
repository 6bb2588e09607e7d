pub mod cache;
pub mod versioning;
pub mod invalidation;

pub use cache::ContentCache;
pub use versioning::CacheEntry;
