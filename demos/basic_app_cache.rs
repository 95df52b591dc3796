use appcache::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), CacheError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cache: AppCache<String> = AppCache::try_new(2)?;

    cache.add_or_update("1", "alpha".to_string())?;
    cache.add_or_update("2", "beta".to_string())?;

    if let Some(value) = cache.try_get_value("1") {
        println!("hit 1: {}", value.as_str());
    }

    cache.add_or_update("3", "gamma".to_string())?;
    println!("contains 2? {}", cache.contains("2"));

    match cache.add_or_update("", "nothing".to_string()) {
        Err(err) => println!("rejected: {err}"),
        Ok(()) => unreachable!("empty keys are rejected"),
    }
    println!("count: {}", cache.count());

    Ok(())
}

// Expected output:
// hit 1: alpha
// contains 2? false
// rejected: cache key must not be null or empty
// count: 2
//
// Explanation: capacity=2; after the lookup of "1", "2" is the least recently
// used entry. Adding "3" evicts "2". The empty key fails without touching the
// cache. Run with RUST_LOG=appcache=trace to see hits, misses and evictions.
