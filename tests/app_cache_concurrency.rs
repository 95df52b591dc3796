// ==============================================
// APP CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// One cache instance shared by many threads. Every operation takes the same
// lock, so the checks here are about observable atomicity: bounded size,
// last-writer-wins on a single key and a consistent index afterwards.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use appcache::AppCache;

// ==============================================
// Same-key writers
// ==============================================

mod same_key {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore)]
    fn racing_writers_leave_one_entry_with_a_written_value() {
        let num_threads = 8;

        for _ in 0..100 {
            let cache: AppCache<usize> = AppCache::try_new(4).unwrap();
            let barrier = Arc::new(Barrier::new(num_threads));

            let handles: Vec<_> = (0..num_threads)
                .map(|tid| {
                    let cache = cache.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        cache.add_or_update("shared", tid).unwrap();
                    })
                })
                .collect();

            for h in handles {
                h.join().unwrap();
            }

            assert_eq!(cache.count(), 1);
            let value = cache.try_get_value("shared").map(|v| *v);
            assert!(
                matches!(value, Some(v) if v < num_threads),
                "unexpected value {value:?}"
            );
            cache.check_invariants().unwrap();
        }
    }
}

// ==============================================
// Capacity under contention
// ==============================================

mod capacity {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore)]
    fn concurrent_inserts_respect_capacity() {
        let capacity = 10;
        let num_threads = 16;
        let inserts_per_thread = 50;

        let cache: AppCache<u64> = AppCache::try_new(capacity as i64).unwrap();
        let barrier = Arc::new(Barrier::new(num_threads));

        let handles: Vec<_> = (0..num_threads)
            .map(|tid| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..inserts_per_thread {
                        let key = format!("{tid}_{i}");
                        cache.add_or_update(key, i as u64).unwrap();
                        assert!(cache.count() <= capacity);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(cache.count(), capacity);
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Mixed workload
// ==============================================

mod mixed {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore)]
    fn readers_and_writers_keep_index_consistent() {
        let cache: AppCache<String> = AppCache::try_new(64).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let num_threads = 8;
        let ops_per_thread = 500;

        for i in 0..64 {
            cache.add_or_update(format!("key_{i}"), format!("v{i}")).unwrap();
        }

        let handles: Vec<_> = (0..num_threads)
            .map(|tid| {
                let cache = cache.clone();
                let hits = hits.clone();
                thread::spawn(move || {
                    for i in 0..ops_per_thread {
                        let key = format!("key_{}", (tid * 31 + i) % 128);
                        match i % 3 {
                            0 => {
                                cache.add_or_update(&key, format!("t{tid}_{i}")).unwrap();
                            },
                            _ => {
                                if cache.try_get_value(&key).is_some() {
                                    hits.fetch_add(1, Ordering::Relaxed);
                                }
                            },
                        }
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        println!(
            "mixed workload: {} hits over {} lookups",
            hits.load(Ordering::Relaxed),
            num_threads * ops_per_thread * 2 / 3
        );
        assert!(cache.count() <= cache.capacity());
        cache.check_invariants().unwrap();
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn invalid_keys_from_many_threads_never_mutate() {
        let cache: AppCache<u8> = AppCache::try_new(4).unwrap();
        cache.add_or_update("keep", 1).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(cache.add_or_update("", 0).is_err());
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(cache.count(), 1);
        assert_eq!(cache.try_get_value("keep").as_deref(), Some(&1));
    }
}
