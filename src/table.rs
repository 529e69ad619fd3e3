//! Unique table: the hash-consing arena behind canonical node allocation.
//!
//! Values live in a flat vector and are addressed by stable positions.
//! Position 0 is a sentinel and never handed out. Buckets chain entries
//! through their `next` field; a bucket head of 0 means "empty".

use std::cmp::min;
use std::ops::Index;

use crate::utils::MyHash;

#[derive(Clone)]
struct Entry<T> {
    value: T,
    next: usize,
}

impl<T> Default for Entry<T>
where
    T: Default,
{
    fn default() -> Self {
        Self {
            value: T::default(),
            next: 0,
        }
    }
}

pub struct Table<T> {
    data: Vec<Entry<T>>,

    buckets: Vec<usize>,
    bitmask: u64,

    /// Index of the last occupied cell.
    last_index: usize,
}

impl<T> Table<T>
where
    T: Default,
{
    /// Create a new table of size `2^bits`.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");

        let capacity = 1 << bits;
        let mut data: Vec<Entry<T>> = Vec::with_capacity(capacity);
        data.resize_with(capacity, Entry::default);

        let buckets_bits = min(bits, 16);
        let buckets_size = 1 << buckets_bits;
        let buckets = vec![0; buckets_size];
        let bitmask = (buckets_size - 1) as u64;

        Self {
            data,
            buckets,
            bitmask,
            last_index: 0,
        }
    }
}

impl<T> Table<T> {
    /// Get the capacity of the table (including the sentinel cell).
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
    /// Get the number of stored values.
    pub fn size(&self) -> usize {
        self.last_index
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        assert_ne!(index, 0, "Index is 0");
        assert!(index <= self.last_index, "Index {} is not allocated", index);
        &self.data[index].value
    }

    /// Get the index of the next cell in the bucket chain.
    fn next(&self, index: usize) -> usize {
        self.data[index].next
    }

    /// Add a new value to the table and return its index.
    fn add(&mut self, value: T) -> usize {
        let index = self.last_index + 1;
        if index >= self.capacity() {
            panic!("Storage is full");
        }
        self.last_index = index;

        self.data[index].value = value;
        self.data[index].next = 0;

        index
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Find the index of a value equal to the given one.
    pub fn find(&self, value: &T) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(value)];
        while index != 0 {
            if &self.data[index].value == value {
                return Some(index);
            }
            index = self.next(index);
        }
        None
    }

    /// Put a value into the table and return its index.
    ///
    /// If an equal value is already stored, its index is returned instead.
    pub fn put(&mut self, value: T) -> usize {
        let bucket_index = self.bucket_index(&value);
        let mut index = self.buckets[bucket_index];

        if index == 0 {
            // Create new entry and put it into the bucket.
            let i = self.add(value);
            self.buckets[bucket_index] = i;
            return i;
        }

        loop {
            if value == self.data[index].value {
                // The value already exists.
                return index;
            }

            let next = self.next(index);

            if next == 0 {
                // Create new entry and append it to the bucket.
                let i = self.add(value);
                self.data[index].next = i;
                return i;
            } else {
                index = next;
            }
        }
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}
