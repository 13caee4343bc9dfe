//! Fixed-N dispatch: a longest-processing-time (LPT) heuristic that
//! balances `num_parts` partitions as evenly as possible.
//!
//! Sized entries (`raw_size > 0`) are placed first, largest-effective-size
//! first, always onto the least-loaded partition — a min-heap keyed on
//! `(current_size, partition_index)` makes that an O(log K) operation per
//! entry. Zero-raw-size entries are placed afterward, in their original
//! order, by the same least-loaded rule, which round-robins them across
//! partitions whenever sizes tie.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::entry::EntryList;
use crate::options::Options;
use crate::partition::Partition;
use crate::sizing::effective_size;

/// Runs LPT dispatch over every entry in `entries`, producing exactly
/// `num_parts` partitions (some possibly empty) and assigning each
/// entry's `partition_index` in place.
pub fn dispatch(entries: &mut EntryList, num_parts: u32, options: &Options) -> Vec<Partition> {
    let mut partitions: Vec<Partition> = (0..num_parts)
        .map(|i| Partition::new(i, options.preload_size))
        .collect();

    let mut heap: BinaryHeap<Reverse<(u64, u32)>> = partitions
        .iter()
        .map(|p| Reverse((p.current_size, p.index)))
        .collect();

    let mut sized = entries.sized_indices();
    sized.sort_by_key(|&idx| Reverse(effective_size(
        entries.get(idx).size,
        options.overload_size,
        options.round_size,
    )));

    for idx in sized {
        place_least_loaded(&mut heap, &mut partitions, entries, idx, options);
    }

    for idx in entries.empty_indices() {
        place_least_loaded(&mut heap, &mut partitions, entries, idx, options);
    }

    partitions
}

fn place_least_loaded(
    heap: &mut BinaryHeap<Reverse<(u64, u32)>>,
    partitions: &mut [Partition],
    entries: &mut EntryList,
    idx: usize,
    options: &Options,
) {
    let Reverse((_, chosen)) = heap.pop().expect("heap always holds num_parts entries");
    let eff = effective_size(entries.get(idx).size, options.overload_size, options.round_size);

    let partition = &mut partitions[chosen as usize];
    partition.add(idx, eff);
    entries.get_mut(idx).assign(chosen);

    heap.push(Reverse((partition.current_size, chosen)));
}
