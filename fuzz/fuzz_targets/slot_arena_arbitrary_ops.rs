#![no_main]

use libfuzzer_sys::fuzz_target;
use appcache::ds::SlotArena;

// Fuzz arbitrary operation sequences on SlotArena
//
// Tests random sequences of insert, remove, get, get_mut, contains and iter,
// including reuse of stale handles after their slot was recycled.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u32> = SlotArena::new();
    let mut all_ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                let id = arena.insert(value);
                all_ids.push(id);
                assert_eq!(arena.get(id), Some(&value));
            }
            1 => {
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let old_len = arena.len();
                    if arena.remove(id).is_some() {
                        assert_eq!(arena.len(), old_len - 1);
                        assert!(!arena.contains(id));
                    } else {
                        assert_eq!(arena.len(), old_len);
                    }
                }
            }
            2 => {
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    assert_eq!(arena.contains(id), arena.get(id).is_some());
                }
            }
            3 => {
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    if let Some(slot) = arena.get_mut(id) {
                        *slot = value;
                        assert_eq!(arena.get(id), Some(&value));
                    }
                }
            }
            4 => {
                assert_eq!(arena.iter().count(), arena.len());
            }
            5 => {
                // Stale handles never alias a recycled slot.
                let live = all_ids.iter().filter(|id| arena.contains(**id)).count();
                assert_eq!(live, arena.len());
            }
            _ => unreachable!(),
        }

        assert_eq!(arena.is_empty(), arena.len() == 0);
    }
});
