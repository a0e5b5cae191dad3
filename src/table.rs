use crate::utils::MyHash;

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    /// Index of the next entry in the same bucket (0 terminates the chain).
    next: usize,
}

/// Append-only unique table.
///
/// Every value put into the table gets a stable index, and putting an equal value again
/// returns the index it already has. Buckets are chains threaded through the entries.
/// Index 0 is a sentinel and never holds a real value.
#[derive(Debug)]
pub struct Table<T> {
    data: Vec<Entry<T>>,
    buckets: Vec<usize>,
    bitmask: u64,
}

impl<T> Table<T>
where
    T: Default,
{
    /// Create a new table with `2^bits` buckets.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");

        let buckets_size = 1 << bits;
        let data = vec![Entry {
            value: T::default(),
            next: 0,
        }];

        Self {
            data,
            buckets: vec![0; buckets_size],
            bitmask: (buckets_size - 1) as u64,
        }
    }
}

impl<T> Table<T> {
    /// Number of stored values (the sentinel excluded).
    pub fn size(&self) -> usize {
        self.data.len() - 1
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        assert_ne!(index, 0, "Index is 0");
        &self.data[index].value
    }

    /// Add a value without hash-consing it and return its index.
    ///
    /// Values added this way are never found by [`put`][Table::put].
    pub fn add(&mut self, value: T) -> usize {
        self.data.push(Entry { value, next: 0 });
        self.data.len() - 1
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Find the index of an equal value, if it was put before.
    pub fn find(&self, value: &T) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(value)];
        while index != 0 {
            if &self.data[index].value == value {
                return Some(index);
            }
            index = self.data[index].next;
        }
        None
    }

    /// Put a value into the table and return its index, reusing the index of an equal value.
    pub fn put(&mut self, value: T) -> usize {
        if let Some(index) = self.find(&value) {
            return index;
        }

        let bucket_index = self.bucket_index(&value);
        let head = self.buckets[bucket_index];
        let index = self.add(value);
        // Prepend to the chain.
        self.data[index].next = head;
        self.buckets[bucket_index] = index;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
    struct Item(i32);

    impl MyHash for Item {
        fn hash(&self) -> u64 {
            self.0.unsigned_abs() as u64
        }
    }

    #[test]
    fn test_add() {
        let mut table = Table::<Item>::new(2);
        let index = table.add(Item(42));
        assert_eq!(index, 1);
        assert_eq!(table.value(index), &Item(42));
        // Added values are not hash-consed.
        assert_eq!(table.find(&Item(42)), None);
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_put_dedup() {
        let mut table = Table::new(2);
        let a = table.put(Item(5));
        let b = table.put(Item(5));
        assert_eq!(a, b);
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_put_collision() {
        let mut table = Table::new(2);
        let index1 = table.put(Item(5));
        let index2 = table.put(Item(-5));
        assert_ne!(index1, index2);
        assert_eq!(table.value(index1), &Item(5));
        assert_eq!(table.value(index2), &Item(-5));
        assert_eq!(table.find(&Item(5)), Some(index1));
        assert_eq!(table.find(&Item(-5)), Some(index2));
        assert_eq!(table.find(&Item(6)), None);
    }

    #[test]
    fn test_grows_past_bucket_count() {
        let mut table = Table::new(1);
        let indices: Vec<_> = (1..=100).map(|i| table.put(Item(i))).collect();
        assert_eq!(table.size(), 100);
        for (i, &index) in indices.iter().enumerate() {
            assert_eq!(table.value(index), &Item(i as i32 + 1));
            assert_eq!(table.put(Item(i as i32 + 1)), index);
        }
    }

    #[test]
    #[should_panic(expected = "Index is 0")]
    fn test_sentinel() {
        let table = Table::<Item>::new(2);
        table.value(0);
    }
}
