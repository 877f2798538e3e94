use rand::Rng;
use tgen_core::RngHandle;

/// Fenwick tree over per-slot multiplicities.
///
/// Slots are appended at the end and removed from the end only; callers that
/// need to drop an inner slot move the last slot into it first. Prefix sums,
/// point updates and weighted draws all cost `O(log n)`.
#[derive(Debug, Clone, Default)]
pub(crate) struct WeightTable {
    tree: Vec<u64>,
    values: Vec<u64>,
}

fn lowbit(index: usize) -> usize {
    index & index.wrapping_neg()
}

impl WeightTable {
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn value(&self, slot: usize) -> u64 {
        self.values[slot]
    }

    pub(crate) fn total(&self) -> u64 {
        self.prefix(self.len())
    }

    /// Sum of the first `count` slots.
    fn prefix(&self, count: usize) -> u64 {
        let mut index = count;
        let mut sum = 0u64;
        while index > 0 {
            sum += self.tree[index - 1];
            index -= lowbit(index);
        }
        sum
    }

    pub(crate) fn push(&mut self, value: u64) {
        let index = self.len() + 1;
        let covered = self.prefix(index - 1) - self.prefix(index - lowbit(index));
        self.tree.push(covered + value);
        self.values.push(value);
    }

    /// Drops the last slot and returns its value.
    pub(crate) fn pop(&mut self) -> Option<u64> {
        self.tree.pop();
        self.values.pop()
    }

    pub(crate) fn increase(&mut self, slot: usize, delta: u64) {
        self.values[slot] += delta;
        let mut index = slot + 1;
        while index <= self.tree.len() {
            self.tree[index - 1] += delta;
            index += lowbit(index);
        }
    }

    pub(crate) fn decrease(&mut self, slot: usize, delta: u64) {
        self.values[slot] -= delta;
        let mut index = slot + 1;
        while index <= self.tree.len() {
            self.tree[index - 1] -= delta;
            index += lowbit(index);
        }
    }

    /// Smallest slot whose inclusive prefix sum exceeds `target`.
    fn locate(&self, target: u64) -> usize {
        let len = self.tree.len();
        let mut position = 0usize;
        let mut remaining = target;
        let mut step = if len == 0 {
            0
        } else {
            1usize << (usize::BITS - 1 - len.leading_zeros())
        };
        while step > 0 {
            let next = position + step;
            if next <= len && self.tree[next - 1] <= remaining {
                position = next;
                remaining -= self.tree[next - 1];
            }
            step >>= 1;
        }
        position
    }

    /// Draws a slot with probability proportional to its value.
    pub(crate) fn sample(&self, rng: &mut RngHandle) -> Option<usize> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let target = rng.gen_range(0..total);
        Some(self.locate(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(values: &[u64]) -> WeightTable {
        let mut table = WeightTable::default();
        for value in values {
            table.push(*value);
        }
        table
    }

    #[test]
    fn prefix_sums_track_updates() {
        let mut weights = table(&[3, 0, 5, 1, 2]);
        assert_eq!(weights.total(), 11);
        assert_eq!(weights.prefix(3), 8);
        weights.increase(1, 4);
        weights.decrease(2, 5);
        assert_eq!(weights.prefix(3), 7);
        assert_eq!(weights.total(), 10);
        assert_eq!(weights.pop(), Some(2));
        assert_eq!(weights.total(), 8);
        weights.push(6);
        assert_eq!(weights.total(), 14);
        assert_eq!(weights.value(4), 6);
    }

    #[test]
    fn locate_maps_every_unit_to_its_slot() {
        let weights = table(&[2, 0, 3, 1]);
        let owners: Vec<usize> = (0..weights.total()).map(|t| weights.locate(t)).collect();
        assert_eq!(owners, vec![0, 0, 2, 2, 2, 3]);
    }

    #[test]
    fn sampling_skips_empty_slots() {
        let weights = table(&[0, 4, 0]);
        let mut rng = RngHandle::from_seed(5);
        for _ in 0..64 {
            assert_eq!(weights.sample(&mut rng), Some(1));
        }
        assert_eq!(WeightTable::default().sample(&mut rng), None);
    }
}
