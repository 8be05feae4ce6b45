//! 持久化栈：不可变的后进先出序列，压栈与出栈均返回新栈并共享原有节点。
use std::fmt;
use std::sync::Arc;

struct Node<T> {
    item: T,
    next: Option<Arc<Node<T>>>,
}

/// An immutable LIFO stack with structural sharing.
///
/// `push` and `pop` never touch the receiver; every stack obtained earlier
/// keeps observing exactly the items it held when it was created.
pub struct PersistentStack<T> {
    head: Option<Arc<Node<T>>>,
    len: usize,
}

impl<T> PersistentStack<T> {
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn push(&self, item: T) -> Self {
        Self {
            head: Some(Arc::new(Node {
                item,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Returns the top item (if any) together with the stack below it.
    pub fn pop(&self) -> (Option<&T>, Self) {
        match self.head.as_deref() {
            Some(node) => (
                Some(&node.item),
                Self {
                    head: node.next.clone(),
                    len: self.len - 1,
                },
            ),
            None => (None, Self::new()),
        }
    }

    pub fn peek(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.item)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Iterates from the most recently pushed item down to the oldest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Clones the items out in push order (oldest first).
    pub fn to_vec_chronological(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut items: Vec<T> = self.iter().cloned().collect();
        items.reverse();
        items
    }
}

impl<T> Clone for PersistentStack<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for PersistentStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Unlink iteratively; the derived drop would recurse once per node.
impl<T> Drop for PersistentStack<T> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T> FromIterator<T> for PersistentStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |stack, item| stack.push(item))
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for PersistentStack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.item
        })
    }
}

impl<'a, T> IntoIterator for &'a PersistentStack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
