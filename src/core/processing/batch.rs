//! Delivery-shaped grouping of photocards.
//!
//! Both the bulk iterator (`batch`) and the streaming builder (`BatchBuilder`)
//! cut the input into consecutive groups of `max` items with a shorter final
//! group, and neither ever yields an empty batch.
use crate::error::{Error, Result};

/// Ordered, non-empty group of at most `max` items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<T> {
    items: Vec<T>,
}

impl<T> Batch<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for Batch<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

fn check_max(max: usize) -> Result<()> {
    if max == 0 {
        return Err(Error::invalid("max_per_batch", max));
    }
    Ok(())
}

/// Lazy iterator over consecutive batches of an input sequence.
#[derive(Debug, Clone)]
pub struct Batches<I> {
    inner: I,
    max: usize,
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Batch<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let items: Vec<I::Item> = self.inner.by_ref().take(self.max).collect();
        if items.is_empty() {
            None
        } else {
            Some(Batch { items })
        }
    }
}

/// Partition `items` into batches of `max`; the last batch holds the remainder.
/// An empty input yields no batches at all.
pub fn batch<I: IntoIterator>(items: I, max: usize) -> Result<Batches<I::IntoIter>> {
    check_max(max)?;
    Ok(Batches {
        inner: items.into_iter(),
        max,
    })
}

/// Incremental counterpart of [`batch`]: feed items one at a time and collect
/// each batch as soon as it fills up.
#[derive(Debug)]
pub struct BatchBuilder<T> {
    pending: Vec<T>,
    max: usize,
    emitted: usize,
}

impl<T> BatchBuilder<T> {
    pub fn new(max: usize) -> Result<Self> {
        check_max(max)?;
        Ok(Self {
            pending: Vec::new(),
            max,
            emitted: 0,
        })
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Batches handed out so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Add one item; returns the completed batch when it reaches `max`.
    pub fn push(&mut self, item: T) -> Option<Batch<T>> {
        self.pending.push(item);
        if self.pending.len() < self.max {
            return None;
        }
        self.take()
    }

    /// Flush the partial batch at end of input, if any.
    pub fn finish(mut self) -> Option<Batch<T>> {
        self.take()
    }

    fn take(&mut self) -> Option<Batch<T>> {
        if self.pending.is_empty() {
            return None;
        }
        let items = std::mem::take(&mut self.pending);
        self.emitted += 1;
        Some(Batch { items })
    }
}
