#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use appcache::{AppCache, CacheError};

// Fuzz AppCache against a naive LRU model
//
// Keys come from a small alphabet (including the empty key) so updates,
// evictions and rejected keys all occur often. After every step the cache
// must agree with the model on contents and recency order.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 8) + 1;
    let cache: AppCache<u8> = match AppCache::try_new(capacity as i64) {
        Ok(cache) => cache,
        Err(_) => return,
    };
    // Front is least recently used.
    let mut model: VecDeque<(String, u8)> = VecDeque::new();

    for pair in ops.chunks_exact(2) {
        let key = match pair[0] % 12 {
            0 => String::new(),
            k => format!("k{k}"),
        };
        let value = pair[1];

        if pair[1] % 2 == 0 {
            let result = cache.add_or_update(key.as_str(), value);
            if key.is_empty() {
                assert_eq!(result, Err(CacheError::InvalidKey));
            } else {
                assert!(result.is_ok());
                if let Some(p) = model.iter().position(|(k, _)| *k == key) {
                    model.remove(p);
                } else if model.len() == capacity {
                    model.pop_front();
                }
                model.push_back((key, value));
            }
        } else {
            let got = cache.try_get_value(&key).map(|v| *v);
            let expected = model.iter().position(|(k, _)| *k == key).map(|p| {
                let entry = model.remove(p).unwrap_or_default();
                let v = entry.1;
                model.push_back(entry);
                v
            });
            assert_eq!(got, expected);
        }

        assert_eq!(cache.count(), model.len());
        assert!(cache.count() <= capacity);
        let keys: Vec<String> = cache
            .keys_by_recency()
            .into_iter()
            .map(|k| k.as_str().to_owned())
            .collect();
        assert!(keys.iter().eq(model.iter().map(|(k, _)| k)));
    }

    assert!(cache.check_invariants().is_ok());
});
