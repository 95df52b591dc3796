#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use appcache::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList against a VecDeque model
//
// Tests push_back, pop_front, remove, move_to_back and position, checking the
// full traversal order and link integrity after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u32> = RecencyList::new();
    let mut model: VecDeque<u32> = VecDeque::new();
    let mut ids = Vec::new();
    let mut next = 0u32;

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 5;
        let pick = pair[1] as usize;

        match op {
            0 => {
                let id = list.push_back(next);
                ids.push((id, next));
                model.push_back(next);
                next += 1;
                assert_eq!(list.back_id(), Some(id));
            }
            1 => {
                assert_eq!(list.pop_front(), model.pop_front());
            }
            2 => {
                if !ids.is_empty() {
                    let (id, value) = ids[pick % ids.len()];
                    let removed = list.remove(id);
                    let pos = model.iter().position(|v| *v == value);
                    assert_eq!(removed, pos.and_then(|p| model.remove(p)));
                }
            }
            3 => {
                if !ids.is_empty() {
                    let (id, value) = ids[pick % ids.len()];
                    let moved = list.move_to_back(id);
                    if let Some(p) = model.iter().position(|v| *v == value) {
                        assert!(moved);
                        model.remove(p);
                        model.push_back(value);
                    } else {
                        assert!(!moved);
                    }
                }
            }
            4 => {
                if !ids.is_empty() {
                    let (id, value) = ids[pick % ids.len()];
                    assert_eq!(list.position(id), model.iter().position(|v| *v == value));
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(list.len(), model.len());
        assert!(list.iter().eq(model.iter()));
        assert!(list.check_links().is_ok());
    }
});
