/*!
A binary max-heap over a fixed range of indices, keyed by a value stored for every index.

The values are kept for every index, whether or not the index is on the heap, so an index may leave the heap and later return with the value it had.
A companion vector records the position of each index on the heap, which allows an index to be repositioned in `O(log n)` after its value is updated.

[IndexHeap] is used for the [scores](crate::heuristics::scores) of variables in stable mode.

```rust
# use kissat_core::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();
heap.grow(601);
heap.set_value(600, 10.0);
heap.set_value(0, 70.0);
heap.push(600);
heap.push(0);

assert_eq!(heap.pop_max(), Some(0));
assert_eq!(heap.pop_max(), Some(600));
assert!(heap.pop_max().is_none());
```
*/

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Copy + Default> {
    /// The value of each index.
    values: Vec<V>,

    /// The position of each index on the heap, if present.
    positions: Vec<Option<usize>>,

    /// The heap, as a vector of indices.
    heap: Vec<usize>,
}

impl<V: PartialOrd + Copy + Default> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            positions: Vec::default(),
            heap: Vec::default(),
        }
    }
}

impl<V: PartialOrd + Copy + Default> IndexHeap<V> {
    /// Extends the range of indices to `0..count`, with fresh indices off the heap and a default value.
    pub fn grow(&mut self, count: usize) {
        if self.values.len() < count {
            self.values.resize(count, V::default());
            self.positions.resize(count, None);
        }
    }

    /// A count of indices covered by the structure.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// A count of indices on the heap.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if no index is on the heap.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// True if `index` is on the heap.
    pub fn contains(&self, index: usize) -> bool {
        self.positions[index].is_some()
    }

    /// The value of `index`.
    pub fn value(&self, index: usize) -> V {
        self.values[index]
    }

    /// Sets the value of `index` and restores the heap property, if `index` is on the heap.
    pub fn set_value(&mut self, index: usize, value: V) {
        let previous = self.values[index];
        self.values[index] = value;
        if let Some(position) = self.positions[index] {
            if previous < value {
                self.sift_up(position);
            } else {
                self.sift_down(position);
            }
        }
    }

    /// Places `index` on the heap, if not already present.
    /// Returns true if `index` was added, false otherwise.
    pub fn push(&mut self, index: usize) -> bool {
        if self.positions[index].is_some() {
            return false;
        }
        let position = self.heap.len();
        self.heap.push(index);
        self.positions[index] = Some(position);
        self.sift_up(position);
        true
    }

    /// Removes `index` from the heap, if present.
    /// Returns true if `index` was removed, false otherwise.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(position) = self.positions[index] else {
            return false;
        };
        self.positions[index] = None;
        let Some(last) = self.heap.pop() else {
            return false;
        };
        if position < self.heap.len() {
            self.heap[position] = last;
            self.positions[last] = Some(position);
            self.sift_down(position);
            self.sift_up(position);
        }
        true
    }

    /// Peek at the index with the maximum value on the heap.
    pub fn peek_max(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// Pop the index with the maximum value off the heap.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = self.peek_max()?;
        self.remove(max);
        Some(max)
    }

    /// Applies `f` to the value of every index, on the heap or not.
    ///
    /// The heap is not rebuilt, so `f` must preserve the relative order of values.
    pub fn apply_to_all(&mut self, f: impl Fn(V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(*value);
        }
    }

    /// The largest value of any index, on the heap or not.
    pub fn max_value(&self) -> Option<V> {
        self.values.iter().copied().reduce(|a, b| if b > a { b } else { a })
    }

    /// Iterates over the indices on the heap, in heap order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.heap.iter().copied()
    }

    fn sift_up(&mut self, mut position: usize) {
        let index = self.heap[position];
        let value = self.values[index];
        while position > 0 {
            let parent_position = (position - 1) / 2;
            let parent = self.heap[parent_position];
            if self.values[parent] >= value {
                break;
            }
            self.heap[position] = parent;
            self.positions[parent] = Some(position);
            position = parent_position;
        }
        self.heap[position] = index;
        self.positions[index] = Some(position);
    }

    fn sift_down(&mut self, mut position: usize) {
        let index = self.heap[position];
        let value = self.values[index];
        let end = self.heap.len();
        loop {
            let left = 2 * position + 1;
            if left >= end {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < end && self.values[self.heap[right]] > self.values[self.heap[left]] {
                child = right;
            }
            let child_index = self.heap[child];
            if value >= self.values[child_index] {
                break;
            }
            self.heap[position] = child_index;
            self.positions[child_index] = Some(position);
            position = child;
        }
        self.heap[position] = index;
        self.positions[index] = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap_with(values: &[(usize, f64)]) -> IndexHeap<f64> {
        let mut heap = IndexHeap::default();
        heap.grow(values.iter().map(|(index, _)| index + 1).max().unwrap_or(0));
        for (index, value) in values {
            heap.set_value(*index, *value);
            heap.push(*index);
        }
        heap
    }

    #[test]
    fn heap_simple() {
        let mut heap = heap_with(&[(6, 10.0), (5, 20.0), (4, 30.0), (1, 60.0), (0, 70.0)]);

        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(6));
        assert!(heap.pop_max().is_none());
    }

    #[test]
    fn heap_update() {
        let mut heap = heap_with(&[(6, 10.0), (4, 30.0), (1, 60.0), (0, 70.0)]);

        heap.set_value(0, 0.0);
        heap.set_value(1, 1.0);
        heap.set_value(4, 4.0);
        heap.set_value(6, 6.0);

        assert_eq!(heap.pop_max(), Some(6));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn heap_remove() {
        let mut heap = heap_with(&[(6, 6.0), (5, 5.0), (4, 4.0), (1, 1.0), (0, 0.0)]);

        assert!(heap.remove(4));
        assert!(!heap.remove(4));
        assert!(heap.remove(6));
        heap.set_value(4, 10.0);
        assert!(heap.push(4));
        assert!(!heap.push(4));
        heap.set_value(4, 1.5);

        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn scaling_keeps_order() {
        let mut heap = heap_with(&[(0, 3.0), (1, 1e200), (2, 2.5e200), (3, 7.0)]);
        heap.apply_to_all(|value| value * 2.0_f64.powi(-512));

        assert_eq!(heap.pop_max(), Some(2));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(3));
        assert_eq!(heap.pop_max(), Some(0));
    }
}
