use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::trace;

use crate::error::IndexError;

type Result<T> = std::result::Result<T, IndexError>;
type Link = Option<NonNull<Node>>;

struct Node {
    value: String,
    next: Link,
}

impl Node {
    /// Moves a new node to the heap. The list owns it from here on, and it is
    /// only freed through [`Node::release`].
    fn alloc(value: String, next: Link) -> NonNull<Node> {
        NonNull::from(Box::leak(Box::new(Node { value, next })))
    }

    /// Takes a node back from the heap.
    ///
    /// # Safety
    ///
    /// `node` must come from [`Node::alloc`], must not be released twice, and
    /// must not be reached again through any link after this call.
    unsafe fn release(node: NonNull<Node>) -> Node {
        *Box::from_raw(node.as_ptr())
    }
}

/// Singly-linked list of strings with a cached tail.
///
/// Every node is a heap allocation held through a raw pointer. A node is owned
/// by its predecessor's `next` link, or by `head` for the first one. `tail`
/// is a second, non-owning pointer at the last node so that `push` does not
/// walk the chain.
pub struct StringLinkedList {
    head: Link,
    tail: Link,
    len: usize,
    _marker: PhantomData<Box<Node>>,
}

pub struct IntoIter(StringLinkedList);

impl Iterator for IntoIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.shift().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl ExactSizeIterator for IntoIter {}

pub struct Iter<'a> {
    next: Link,
    remaining: usize,
    _marker: PhantomData<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            // SAFETY: the iterator borrows the list, so every linked node
            // stays alive and unmodified for 'a.
            let node: &'a Node = unsafe { &*node.as_ptr() };
            self.next = node.next;
            self.remaining -= 1;
            node.value.as_str()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl StringLinkedList {
    pub fn new() -> Self {
        StringLinkedList {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Builds a list by pushing every value in order.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = StringLinkedList::new();
        list.extend(values);
        list
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> Option<&str> {
        self.head.map(|head| self.value(head))
    }

    /// Value of the tail node, without walking the chain.
    pub fn last(&self) -> Option<&str> {
        self.tail.map(|tail| self.value(tail))
    }

    pub fn push(&mut self, value: impl Into<String>) {
        let node = Node::alloc(value.into(), None);

        match self.tail {
            None => self.head = Some(node),
            // SAFETY: a non-empty list keeps `tail` on its last live node.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
        }

        self.tail = Some(node);
        self.len += 1;
    }

    pub fn unshift(&mut self, value: impl Into<String>) {
        let node = Node::alloc(value.into(), self.head);

        if self.tail.is_none() {
            self.tail = Some(node);
        }

        self.head = Some(node);
        self.len += 1;
    }

    /// Removes the tail. The new tail is found by scanning from the head,
    /// since nodes do not know their predecessor.
    pub fn pop(&mut self) -> Result<String> {
        if self.len == 0 {
            return Err(IndexError::Empty);
        }
        self.remove_at(self.len - 1)
    }

    pub fn shift(&mut self) -> Result<String> {
        let head = self.head.ok_or(IndexError::Empty)?;

        // SAFETY: `head` is unlinked right below. If it was also the tail,
        // `tail` is cleared before anything can read it.
        let node = unsafe { Node::release(head) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;

        Ok(node.value)
    }

    pub fn get_at(&self, index: usize) -> Result<&str> {
        let node = self
            .node_at(index)
            .ok_or_else(|| IndexError::existing(index, self.len))?;
        Ok(self.value(node))
    }

    pub fn set_at(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let node = self
            .node_at(index)
            .ok_or_else(|| IndexError::existing(index, self.len))?;

        // SAFETY: `node` is live and `&mut self` rules out outstanding borrows.
        unsafe { (*node.as_ptr()).value = value.into() };
        Ok(())
    }

    /// Inserts `value` so that it ends up at `index`.
    ///
    /// `index == 0` and `index == len` are handled by [`unshift`](Self::unshift)
    /// and [`push`](Self::push); every other index splices after node
    /// `index - 1`, which always has a successor, so the tail never moves.
    pub fn insert_at(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let len = self.len;

        if index == 0 {
            self.unshift(value);
            return Ok(());
        }
        if index == len {
            self.push(value);
            return Ok(());
        }

        let prev = self
            .node_at(index - 1)
            .ok_or(IndexError::InsertOutOfRange { index, len })?;

        // SAFETY: `prev` is live and not the tail, since index - 1 < len - 1.
        unsafe {
            let prev = prev.as_ptr();
            (*prev).next = Some(Node::alloc(value.into(), (*prev).next));
        }
        self.len += 1;

        trace!("spliced node at {} (len {})", index, self.len);
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<String> {
        if index == 0 {
            return self.shift();
        }

        // Node `index - 1` exists and has a successor exactly when index < len.
        let (prev, target) = self
            .node_at(index - 1)
            .and_then(|prev| self.next_of(prev).map(|target| (prev, target)))
            .ok_or_else(|| IndexError::existing(index, self.len))?;

        // SAFETY: `target` is unlinked from `prev` right below and, if it was
        // the tail, `tail` moves to `prev` before anything can read it.
        let removed = unsafe { Node::release(target) };
        unsafe { (*prev.as_ptr()).next = removed.next };

        if removed.next.is_none() {
            self.tail = Some(prev);
            trace!("removed tail at {}, tail moved back", index);
        }
        self.len -= 1;

        Ok(removed.value)
    }

    /// Snapshot of every value, head first.
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }

    pub fn clear(&mut self) {
        while self.shift().is_ok() {}
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Node at `index`, or `None` when `index >= len`.
    fn node_at(&self, index: usize) -> Link {
        if index >= self.len {
            return None;
        }

        let mut current = self.head;
        for _ in 0..index {
            current = current.and_then(|node| self.next_of(node));
        }
        current
    }

    fn next_of(&self, node: NonNull<Node>) -> Link {
        // SAFETY: only called with nodes linked into this list.
        unsafe { (*node.as_ptr()).next }
    }

    fn value(&self, node: NonNull<Node>) -> &str {
        // SAFETY: `node` is linked into this list and the borrow of `self`
        // keeps it alive and unchanged.
        unsafe { (*node.as_ptr()).value.as_str() }
    }
}

impl Drop for StringLinkedList {
    fn drop(&mut self) {
        self.clear();
    }
}

impl Default for StringLinkedList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StringLinkedList {
    fn clone(&self) -> Self {
        self.iter().collect()
    }
}

impl PartialEq for StringLinkedList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for StringLinkedList {}

impl<S: Into<String>> Extend<S> for StringLinkedList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for StringLinkedList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl From<Vec<String>> for StringLinkedList {
    fn from(values: Vec<String>) -> Self {
        Self::from_values(values)
    }
}

impl IntoIterator for StringLinkedList {
    type Item = String;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a> IntoIterator for &'a StringLinkedList {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for StringLinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for StringLinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        let mut iter = self.iter();
        if let Some(first) = iter.next() {
            write!(f, "{:?}", first)?;
            for value in iter {
                write!(f, ", {:?}", value)?;
            }
        }

        write!(f, "]")
    }
}
