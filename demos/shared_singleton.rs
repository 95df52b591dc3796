use std::sync::OnceLock;
use std::thread;

use appcache::prelude::*;

/// One cache for the whole process, created on first use.
fn app_cache() -> &'static AppCache<String> {
    static CACHE: OnceLock<AppCache<String>> = OnceLock::new();
    CACHE.get_or_init(|| {
        AppCacheBuilder::new(64)
            .try_build()
            .expect("capacity is positive")
    })
}

fn render_profile(user: u32) -> String {
    let key = format!("profile:{user}");
    if let Some(hit) = app_cache().try_get_value(&key) {
        return hit.as_ref().clone();
    }
    let rendered = format!("<profile id={user}>");
    // Concurrent misses may both render; last writer wins.
    let _ = app_cache().add_or_update(&key, rendered.clone());
    rendered
}

fn main() {
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            thread::spawn(move || {
                for user in 0..100u32 {
                    let _ = render_profile((user * (worker + 1)) % 80);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let cache = app_cache();
    println!("cached profiles: {} / {}", cache.count(), cache.capacity());
    if let Some((key, _)) = cache.peek_lru() {
        println!("next to evict: {key}");
    }
}
