use keyed_priority_queue::KeyedPriorityQueue;
use std::cmp::Ordering;

use super::state::{ProcId, Vruntime};

/// Ordering key for the run queue. Lowest vruntime wins; among equal
/// vruntimes the earliest push wins.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct VruntimeKey {
    pub vruntime: Vruntime,
    pub seq: u64,
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop the ordering
impl PartialOrd for VruntimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VruntimeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .vruntime
            .cmp(&self.vruntime)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
pub struct RunQueue {
    tasks: KeyedPriorityQueue<ProcId, VruntimeKey>,
    // Increment upon every push
    next_seq: u64,
}

impl Default for RunQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RunQueue {
    pub fn new() -> Self {
        Self {
            tasks: KeyedPriorityQueue::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, id: ProcId, vruntime: Vruntime) {
        let key = VruntimeKey {
            vruntime,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let previous = self.tasks.push(id, key);
        debug_assert!(previous.is_none(), "{id:?} already present in run queue");
    }

    pub fn pop(&mut self) -> Option<ProcId> {
        self.tasks.pop().map(|(id, _)| id)
    }

    pub fn peek(&self) -> Option<(ProcId, VruntimeKey)> {
        self.tasks.peek().map(|(id, key)| (*id, *key))
    }

    pub fn contains(&self, id: ProcId) -> bool {
        self.tasks.get_priority(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<ProcId> {
        let mut map = SlotMap::<ProcId, ()>::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn pops_lowest_vruntime_first() {
        let ids = ids(3);
        let mut q = RunQueue::new();
        q.push(ids[0], 300);
        q.push(ids[1], 100);
        q.push(ids[2], 200);

        assert_eq!(q.len(), 3);
        assert_eq!(q.peek().map(|(id, _)| id), Some(ids[1]));
        assert_eq!(q.pop(), Some(ids[1]));
        assert_eq!(q.pop(), Some(ids[2]));
        assert_eq!(q.pop(), Some(ids[0]));
        assert_eq!(q.pop(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_vruntime_is_served_in_push_order() {
        let ids = ids(4);
        let mut q = RunQueue::new();
        for id in [ids[2], ids[0], ids[3], ids[1]] {
            q.push(id, 1024);
        }

        let order: Vec<_> = std::iter::from_fn(|| q.pop()).collect();
        assert_eq!(order, vec![ids[2], ids[0], ids[3], ids[1]]);
    }

    #[test]
    fn requeued_entry_goes_behind_its_peers() {
        let ids = ids(2);
        let mut q = RunQueue::new();
        q.push(ids[0], 0);
        q.push(ids[1], 0);

        let first = q.pop().unwrap();
        q.push(first, 0);
        assert_eq!(q.pop(), Some(ids[1]));
        assert!(q.contains(first));
        assert!(!q.contains(ids[1]));
    }

    #[test]
    fn negative_vruntime_sorts_before_zero() {
        let ids = ids(2);
        let mut q = RunQueue::new();
        q.push(ids[0], 0);
        q.push(ids[1], -5);
        assert_eq!(q.pop(), Some(ids[1]));
    }
}
