//! Binomial Heap implementation
//!
//! A binomial heap is a collection of binomial trees with:
//! - O(log n) insert and extract-min
//! - O(log n) decrease_key (bubble up, no cutting)
//! - O(log n) union
//!
//! # Algorithm Overview
//!
//! The heap keeps a singly linked **root list** of binomial trees, where:
//! - Each tree satisfies the heap property
//! - Degrees strictly increase from the head of the list to its tail
//! - At most one tree of each degree (0, 1, 2, ..., log n)
//! - This is analogous to the binary representation of n
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by linking two B_{k-1} trees
//! - Bₖ has exactly 2ᵏ nodes and one child of each degree k-1, ..., 0
//!
//! **Key Operations**:
//! - **Insert**: prepend a B₀ to the root list, then resolve degree conflicts
//! - **Union**: splice both root lists by degree (like merging sorted lists),
//!   then resolve degree conflicts (carry propagation)
//! - **Extract-min**: unlink the minimum root, reverse its children into an
//!   ascending root list and union them back in
//! - **Decrease-key**: swap keys upward along the parent chain
//! - **Delete**: bubble the key all the way to its root, then extract it
//!
//! **Invariant**: After every completed operation the root list holds at most one
//! tree per degree and `minimum` points at a root holding the smallest key.

use crate::traits::{Handle, Heap, HeapError, SearchableHeap};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};
use tracing::{debug, info, trace, warn};

/// Type alias for node reference (strong reference)
type NodeRef<K> = Rc<RefCell<Node<K>>>;

/// Type alias for optional node reference
type NodePtr<K> = Option<NodeRef<K>>;

/// Type alias for weak node reference (for parent links, the minimum and handles)
type WeakNodeRef<K> = Weak<RefCell<Node<K>>>;

/// Handle to a node in a binomial heap
///
/// The handle uses a weak reference to the node, allowing detection
/// of whether the node has been removed from the heap.
///
/// Decrease-key swaps keys rather than nodes, so a handle names a position in a
/// tree, not a value: after `decrease_key` the value may have moved to an
/// ancestor. The handle returned by `decrease_key` points at its new position.
pub struct BinomialHandle<K> {
    node: WeakNodeRef<K>,
}

impl<K> BinomialHandle<K> {
    fn new(node: &NodeRef<K>) -> Self {
        BinomialHandle {
            node: Rc::downgrade(node),
        }
    }

    /// Returns true while the node is still stored in a heap
    pub fn is_valid(&self) -> bool {
        self.node.strong_count() > 0
    }

    /// Number of children of the node, or `None` if it was removed
    pub fn degree(&self) -> Option<usize> {
        let node = self.node.upgrade()?;
        let degree = node.borrow().degree;
        Some(degree)
    }

    /// Whether the node currently sits in the root list
    pub fn is_root(&self) -> Option<bool> {
        let node = self.node.upgrade()?;
        let is_root = node.borrow().parent.is_none();
        Some(is_root)
    }

    /// The key currently stored at this node
    pub fn key(&self) -> Option<K>
    where
        K: Clone,
    {
        let node = self.node.upgrade()?;
        let key = node.borrow().key.clone();
        Some(key)
    }
}

impl<K> Clone for BinomialHandle<K> {
    fn clone(&self) -> Self {
        BinomialHandle {
            node: self.node.clone(),
        }
    }
}

impl<K> PartialEq for BinomialHandle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.node.ptr_eq(&other.node)
    }
}

impl<K> Eq for BinomialHandle<K> {}

impl<K> fmt::Debug for BinomialHandle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHandle")
            .field("valid", &self.is_valid())
            .finish()
    }
}

impl<K> Handle for BinomialHandle<K> {}

/// A node popped by [`BinomialHeap::extract_min`], detached from every tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedNode<K> {
    /// The key the node held
    pub key: K,
    /// Order of the binomial tree the node was rooting when it was removed
    pub degree: usize,
}

/// Structural defect reported by [`BinomialHeap::check_invariants`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A child holds a smaller key than its parent
    HeapOrder,
    /// A child list is not in strictly decreasing degree order k-1, ..., 0
    ChildDegree { expected: usize, found: usize },
    /// A node's degree does not match the length of its child list
    ChildCount { degree: usize, children: usize },
    /// A tree of degree k does not hold exactly 2ᵏ nodes
    SubtreeSize { degree: usize, nodes: usize },
    /// A parent back-link does not point at the owning node
    BrokenParentLink,
    /// Root degrees are not strictly increasing along the root list
    RootOrder { previous: usize, next: usize },
    /// The cached minimum is missing, detached, or not the smallest root
    StaleMinimum,
    /// The recorded length disagrees with the number of reachable nodes
    LengthMismatch { recorded: usize, counted: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::HeapOrder => write!(f, "child key is smaller than its parent key"),
            InvariantViolation::ChildDegree { expected, found } => {
                write!(f, "child of degree {found} where degree {expected} was expected")
            }
            InvariantViolation::ChildCount { degree, children } => {
                write!(f, "node of degree {degree} has {children} children")
            }
            InvariantViolation::SubtreeSize { degree, nodes } => {
                write!(f, "tree of degree {degree} holds {nodes} nodes")
            }
            InvariantViolation::BrokenParentLink => {
                write!(f, "parent link does not match tree structure")
            }
            InvariantViolation::RootOrder { previous, next } => {
                write!(f, "root of degree {next} follows root of degree {previous}")
            }
            InvariantViolation::StaleMinimum => {
                write!(f, "cached minimum is not the smallest root")
            }
            InvariantViolation::LengthMismatch { recorded, counted } => {
                write!(f, "recorded length {recorded} but {counted} nodes are reachable")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Internal node structure for binomial heap
///
/// **Memory Model**: Strong references flow from roots downward (child, sibling).
/// Weak references flow upward (parent) to avoid reference cycles.
///
/// **Child order**: linking prepends, so the first child always has the highest
/// degree and the sibling chain descends to the degree-0 child.
struct Node<K> {
    key: K,
    /// Parent node - weak reference to avoid cycles (None if root)
    parent: Option<WeakNodeRef<K>>,
    /// First child in child list - strong reference (None if leaf)
    child: NodePtr<K>,
    /// Next node in the root list or in the parent's child list
    sibling: NodePtr<K>,
    /// Number of children. A binomial tree Bₖ has root degree k and 2ᵏ nodes
    degree: usize,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Node {
            key,
            parent: None,
            child: None,
            sibling: None,
            degree: 0,
        }
    }
}

/// Binomial Heap
///
/// # Example
///
/// ```rust
/// use rust_binomial_heap::binomial::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// heap.insert(12);
/// heap.insert(21);
///
/// let mut other = BinomialHeap::new();
/// other.insert(7);
/// other.insert(3);
/// heap.union(other);
///
/// assert_eq!(heap.extract_min().map(|node| node.key), Ok(3));
/// heap.decrease_key(&21, 1).unwrap();
/// assert_eq!(heap.minimum(), Some(&1));
/// ```
pub struct BinomialHeap<K: Ord> {
    /// Head of the root list, ordered by strictly increasing degree
    root: NodePtr<K>,
    /// Weak reference to the root holding the minimum key
    minimum: Option<WeakNodeRef<K>>,
    /// Number of elements in the heap
    len: usize,
}

// No manual Drop needed - Rc handles cleanup; chains are O(log n) deep

impl<K: Ord> BinomialHeap<K> {
    /// Creates an empty heap
    pub fn new() -> Self {
        BinomialHeap {
            root: None,
            minimum: None,
            len: 0,
        }
    }

    /// Returns the number of keys in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap holds no keys
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every key
    pub fn clear(&mut self) {
        self.root = None;
        self.minimum = None;
        self.len = 0;
    }

    /// Returns the minimum key without removing it
    ///
    /// **Time Complexity**: O(1), the minimum root is cached
    pub fn minimum(&self) -> Option<&K> {
        let min_rc = self.minimum_node()?;

        // SAFETY: We return a reference tied to the &self lifetime.
        // The node is owned by the root list (strong ref), and every mutation of
        // the heap, including through handles, requires &mut self.
        let node_ptr = min_rc.as_ptr();
        unsafe { Some(&(*node_ptr).key) }
    }

    /// Inserts a key, returning a handle to its node
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**:
    /// 1. Create a single-node tree (B₀)
    /// 2. Prepend it to the root list; the head may now share degree 0 with the
    ///    next root, a transient state
    /// 3. Resolve degree conflicts, exactly like adding 1 to a binary counter
    pub fn insert(&mut self, key: K) -> BinomialHandle<K> {
        let node = Rc::new(RefCell::new(Node::new(key)));
        let handle = BinomialHandle::new(&node);

        match self.root.take() {
            None => self.root = Some(node),
            Some(head) => {
                node.borrow_mut().sibling = Some(head);
                self.root = Some(node);
                self.handle_conflicts();
            }
        }

        self.len += 1;
        self.refresh_minimum();
        self.assert_invariants();
        handle
    }

    /// Merges `other` into this heap, consuming it
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**:
    /// 1. Walk both root lists in tandem, always taking the smaller-degree head,
    ///    producing one list of non-decreasing degree (equal neighbours allowed)
    /// 2. Append whichever tail remains
    /// 3. Resolve degree conflicts (carry propagation)
    ///
    /// Handles obtained from `other` stay valid and now refer into this heap.
    pub fn union(&mut self, mut other: BinomialHeap<K>) {
        debug!(left = self.len, right = other.len, "union");

        self.len += other.len;
        self.splice_by_degree(other.root.take());
        other.minimum = None;
        other.len = 0;

        self.refresh_minimum();
        self.assert_invariants();
    }

    /// Removes and returns the node holding the minimum key
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**:
    /// 1. Unlink the minimum root from the root list (head or interior)
    /// 2. Its children are B_{k-1}, ..., B₀ in that order; reverse them through a
    ///    stack into an ascending root list, clearing their parent links
    /// 3. Union that list back into the heap
    ///
    /// # Errors
    /// Returns `HeapError::EmptyHeap` if there is nothing to extract.
    pub fn extract_min(&mut self) -> Result<ExtractedNode<K>, HeapError> {
        let min = self.minimum_node().ok_or(HeapError::EmptyHeap)?;
        self.minimum = None;

        self.unlink_root(&min);
        let children = Self::detach_children(&min);
        self.splice_by_degree(Self::link_list(children));

        self.len -= 1;
        self.refresh_minimum();
        self.assert_invariants();

        // The root list and the children no longer hold strong references to `min`
        let node = Rc::into_inner(min)
            .expect("extracted root must be uniquely owned once unlinked")
            .into_inner();
        debug!(degree = node.degree, remaining = self.len, "extracted minimum");
        Ok(ExtractedNode {
            key: node.key,
            degree: node.degree,
        })
    }

    /// Replaces the key `target` with `new_key` and restores heap order
    ///
    /// **Time Complexity**: O(n) to locate the key, O(log n) to bubble it up
    ///
    /// Keys are swapped with ancestors rather than relinking nodes, so the tree
    /// shape is untouched. Returns a handle to the node where `new_key` came to rest.
    ///
    /// # Errors
    /// - `HeapError::EmptyHeap` on an empty heap
    /// - `HeapError::NotFound` if no node holds `target`
    /// - `HeapError::KeyNotDecreased` if `new_key` is greater than `target`
    pub fn decrease_key(&mut self, target: &K, new_key: K) -> Result<BinomialHandle<K>, HeapError> {
        if self.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        let Some(node) = self.find_node(target) else {
            warn!(len = self.len, "decrease_key target is not present in the heap");
            return Err(HeapError::NotFound);
        };
        self.decrease_node(node, new_key)
    }

    /// Handle-addressed form of [`decrease_key`](Self::decrease_key)
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the node was removed or lives in another heap
    /// - `HeapError::KeyNotDecreased` if `new_key` is greater than the current key
    pub fn decrease_key_at(
        &mut self,
        handle: &BinomialHandle<K>,
        new_key: K,
    ) -> Result<BinomialHandle<K>, HeapError> {
        let node = self.resolve(handle)?;
        self.decrease_node(node, new_key)
    }

    /// Removes one node holding `key` and returns the key
    ///
    /// **Algorithm**: bubble the key unconditionally to the root of its tree (the
    /// equivalent of decreasing it below every other key), then extract that root.
    ///
    /// # Errors
    /// - `HeapError::EmptyHeap` on an empty heap
    /// - `HeapError::NotFound` if no node holds `key`
    pub fn delete(&mut self, key: &K) -> Result<K, HeapError> {
        if self.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        let Some(node) = self.find_node(key) else {
            warn!(len = self.len, "delete target is not present in the heap");
            return Err(HeapError::NotFound);
        };
        self.remove_node(node)
    }

    /// Handle-addressed form of [`delete`](Self::delete)
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the node was removed or lives in another heap.
    pub fn delete_at(&mut self, handle: &BinomialHandle<K>) -> Result<K, HeapError> {
        let node = self.resolve(handle)?;
        self.remove_node(node)
    }

    /// Finds a node holding `value`
    ///
    /// Depth-first over the root list with an explicit stack. A subtree is only
    /// entered when its root is strictly smaller than `value`: heap order rules
    /// out a match anywhere below a larger or equal (but unmatched) key.
    pub fn find(&self, value: &K) -> Option<BinomialHandle<K>> {
        self.find_node(value).map(|node| BinomialHandle::new(&node))
    }

    /// Returns true if some node holds `value`
    pub fn contains(&self, value: &K) -> bool {
        self.find_node(value).is_some()
    }

    /// Degrees of the root list from head to tail
    ///
    /// After any completed operation these are the set bits of `len()`, lowest first.
    pub fn root_degrees(&self) -> Vec<usize> {
        self.roots()
            .iter()
            .map(|root| root.borrow().degree)
            .collect()
    }

    /// Drains the heap, returning its keys in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len);
        while let Ok(node) = self.extract_min() {
            keys.push(node.key);
        }
        keys
    }

    /// Verifies every structural invariant of the heap
    ///
    /// Checks heap order, binomial tree shape, parent links, strictly increasing
    /// root degrees, the cached minimum and the recorded length.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let roots = self.roots();

        let mut counted = 0;
        let mut previous: Option<usize> = None;
        for root in &roots {
            let degree = {
                let root_ref = root.borrow();
                if root_ref.parent.is_some() {
                    return Err(InvariantViolation::BrokenParentLink);
                }
                root_ref.degree
            };
            if let Some(previous) = previous {
                if degree <= previous {
                    return Err(InvariantViolation::RootOrder {
                        previous,
                        next: degree,
                    });
                }
            }
            previous = Some(degree);
            counted += Self::check_tree(root)?;
        }

        if counted != self.len {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.len,
                counted,
            });
        }

        match self.minimum_node() {
            None if roots.is_empty() => Ok(()),
            None => Err(InvariantViolation::StaleMinimum),
            Some(min) => {
                if !roots.iter().any(|root| Rc::ptr_eq(root, &min)) {
                    return Err(InvariantViolation::StaleMinimum);
                }
                let min_ref = min.borrow();
                if roots.iter().any(|root| root.borrow().key < min_ref.key) {
                    return Err(InvariantViolation::StaleMinimum);
                }
                Ok(())
            }
        }
    }

    /// Resolves degree conflicts in the root list
    ///
    /// Scans with (prev, current, next). Equal-degree neighbours are linked, the
    /// smaller key becoming the parent. When three roots of the same degree are
    /// adjacent, the scan steps past the first so the later pair links first; the
    /// carry it produces then sits right after the survivor, matching carry order
    /// in binary addition.
    ///
    /// Precondition: the root list is ordered by non-decreasing degree with at
    /// most three adjacent roots of any one degree.
    fn handle_conflicts(&mut self) {
        let Some(mut current) = self.root.clone() else {
            return;
        };
        let mut prev: NodePtr<K> = None;

        loop {
            let next = match current.borrow().sibling.clone() {
                Some(next) => next,
                None => break,
            };

            let (same_degree, carry_ahead) = {
                let current_ref = current.borrow();
                let next_ref = next.borrow();
                let carry_ahead = match next_ref.sibling.as_ref() {
                    Some(after) => after.borrow().degree == current_ref.degree,
                    None => false,
                };
                (current_ref.degree == next_ref.degree, carry_ahead)
            };

            if !same_degree || carry_ahead {
                prev = Some(current);
                current = next;
                continue;
            }

            let current_wins = current.borrow().key < next.borrow().key;
            if current_wins {
                let after = next.borrow_mut().sibling.take();
                current.borrow_mut().sibling = after;
                Self::link(&current, next);
            } else {
                current.borrow_mut().sibling = None;
                match &prev {
                    Some(prev) => prev.borrow_mut().sibling = Some(Rc::clone(&next)),
                    None => self.root = Some(Rc::clone(&next)),
                }
                let absorbed = mem::replace(&mut current, next);
                Self::link(&current, absorbed);
            }
        }
    }

    /// Links `child` under `parent`; both must root trees of the same degree
    ///
    /// `child` becomes the first (highest-degree) child and `parent` gains one degree.
    fn link(parent: &NodeRef<K>, child: NodeRef<K>) {
        let mut parent_ref = parent.borrow_mut();
        {
            let mut child_ref = child.borrow_mut();
            child_ref.parent = Some(Rc::downgrade(parent));
            child_ref.sibling = parent_ref.child.take();
        }
        parent_ref.child = Some(child);
        parent_ref.degree += 1;
        trace!(degree = parent_ref.degree, "linked equal-degree trees");
    }

    /// Splices `incoming` into the root list by degree and resolves conflicts
    ///
    /// Ties take the incoming root first.
    fn splice_by_degree(&mut self, incoming: NodePtr<K>) {
        let Some(incoming) = incoming else {
            return;
        };
        let Some(existing) = self.root.take() else {
            self.root = Some(incoming);
            return;
        };

        let mut mine = Self::detach_list(Some(existing)).into_iter().peekable();
        let mut theirs = Self::detach_list(Some(incoming)).into_iter().peekable();
        let mut merged = Vec::with_capacity(mine.len() + theirs.len());

        loop {
            let take_mine = match (mine.peek(), theirs.peek()) {
                (Some(a), Some(b)) => a.borrow().degree < b.borrow().degree,
                _ => break,
            };
            merged.extend(if take_mine { mine.next() } else { theirs.next() });
        }
        merged.extend(mine);
        merged.extend(theirs);

        self.root = Self::link_list(merged);
        self.handle_conflicts();
    }

    /// Breaks a sibling chain into its nodes, in chain order
    fn detach_list(head: NodePtr<K>) -> Vec<NodeRef<K>> {
        let mut nodes = Vec::new();
        let mut cursor = head;
        while let Some(node) = cursor {
            cursor = node.borrow_mut().sibling.take();
            nodes.push(node);
        }
        nodes
    }

    /// Chains nodes through their sibling links, in slice order
    fn link_list(nodes: Vec<NodeRef<K>>) -> NodePtr<K> {
        let mut head = None;
        for node in nodes.into_iter().rev() {
            node.borrow_mut().sibling = head;
            head = Some(node);
        }
        head
    }

    /// Takes the children of `node` as independent trees in ascending degree order
    fn detach_children(node: &NodeRef<K>) -> Vec<NodeRef<K>> {
        let first_child = node.borrow_mut().child.take();

        // Children are chained highest degree first
        let mut stack = Vec::with_capacity(node.borrow().degree);
        let mut cursor = first_child;
        while let Some(child) = cursor {
            {
                let mut child_ref = child.borrow_mut();
                child_ref.parent = None;
                cursor = child_ref.sibling.take();
            }
            stack.push(child);
        }

        let mut ascending = Vec::with_capacity(stack.len());
        while let Some(child) = stack.pop() {
            ascending.push(child);
        }
        ascending
    }

    /// Removes `target` from the root list; no-op if it is not a root
    fn unlink_root(&mut self, target: &NodeRef<K>) {
        let Some(head) = self.root.clone() else {
            return;
        };
        if Rc::ptr_eq(&head, target) {
            self.root = target.borrow_mut().sibling.take();
            return;
        }

        let mut cursor = head;
        loop {
            let next = cursor.borrow().sibling.clone();
            match next {
                Some(next) if Rc::ptr_eq(&next, target) => {
                    let after = target.borrow_mut().sibling.take();
                    cursor.borrow_mut().sibling = after;
                    return;
                }
                Some(next) => cursor = next,
                None => return,
            }
        }
    }

    /// Lowers the key of `node` and bubbles it up
    fn decrease_node(
        &mut self,
        node: NodeRef<K>,
        new_key: K,
    ) -> Result<BinomialHandle<K>, HeapError> {
        if new_key > node.borrow().key {
            return Err(HeapError::KeyNotDecreased);
        }

        node.borrow_mut().key = new_key;
        let resting = self.bubble_up(node, false);
        self.offer_minimum(&resting);
        self.assert_invariants();
        Ok(BinomialHandle::new(&resting))
    }

    /// Moves the key of `node` to the root of its tree and extracts it
    fn remove_node(&mut self, node: NodeRef<K>) -> Result<K, HeapError> {
        let root = self.bubble_up(node, true);
        self.minimum = Some(Rc::downgrade(&root));
        // extract_min reclaims the node and needs the only strong reference
        drop(root);
        self.extract_min().map(|extracted| extracted.key)
    }

    /// Bubbles the key of `node` toward the root, returning where it stopped
    ///
    /// Swaps keys (not nodes) with the parent while the key is strictly smaller,
    /// or unconditionally when `to_root` is set. Unconditional swaps shift every
    /// ancestor key one level down the path, which keeps heap order below the root.
    fn bubble_up(&mut self, node: NodeRef<K>, to_root: bool) -> NodeRef<K> {
        let mut current = node;

        loop {
            let parent = match current.borrow().parent.as_ref().and_then(Weak::upgrade) {
                Some(parent) => parent,
                None => break,
            };

            if !to_root && current.borrow().key >= parent.borrow().key {
                break;
            }

            {
                let mut current_ref = current.borrow_mut();
                let mut parent_ref = parent.borrow_mut();
                mem::swap(&mut current_ref.key, &mut parent_ref.key);
            }
            trace!(to_root, "swapped key with parent");

            current = parent;
        }

        current
    }

    /// Points the minimum at `node` if it is a root holding a smaller key
    fn offer_minimum(&mut self, node: &NodeRef<K>) {
        if node.borrow().parent.is_some() {
            return;
        }
        let min = self.minimum_node();
        let smaller = match &min {
            Some(min) => node.borrow().key < min.borrow().key,
            None => true,
        };
        if smaller {
            self.minimum = Some(Rc::downgrade(node));
        }
    }

    /// Recomputes the minimum by scanning the root list
    fn refresh_minimum(&mut self) {
        let mut best: NodePtr<K> = None;
        for root in self.roots() {
            let smaller = match &best {
                Some(best) => root.borrow().key < best.borrow().key,
                None => true,
            };
            if smaller {
                best = Some(root);
            }
        }
        self.minimum = best.as_ref().map(Rc::downgrade);
    }

    fn minimum_node(&self) -> NodePtr<K> {
        self.minimum.as_ref().and_then(Weak::upgrade)
    }

    /// The roots from head to tail
    fn roots(&self) -> Vec<NodeRef<K>> {
        let mut roots = Vec::new();
        let mut cursor = self.root.clone();
        while let Some(root) = cursor {
            cursor = root.borrow().sibling.clone();
            roots.push(root);
        }
        roots
    }

    fn find_node(&self, value: &K) -> NodePtr<K> {
        let mut stack: Vec<NodeRef<K>> = self.root.iter().cloned().collect();

        while let Some(node) = stack.pop() {
            let ordering = node.borrow().key.cmp(value);
            if ordering == Ordering::Equal {
                return Some(node);
            }

            let node_ref = node.borrow();
            // Sibling goes under the child so the child's subtree is searched first
            if let Some(sibling) = &node_ref.sibling {
                stack.push(Rc::clone(sibling));
            }
            if ordering == Ordering::Less {
                if let Some(child) = &node_ref.child {
                    stack.push(Rc::clone(child));
                }
            }
        }

        None
    }

    /// Upgrades a handle, rejecting removed nodes and nodes of other heaps
    fn resolve(&self, handle: &BinomialHandle<K>) -> Result<NodeRef<K>, HeapError> {
        let node = handle.node.upgrade().ok_or(HeapError::InvalidHandle)?;

        let mut top = Rc::clone(&node);
        loop {
            let parent = top.borrow().parent.as_ref().and_then(Weak::upgrade);
            match parent {
                Some(parent) => top = parent,
                None => break,
            }
        }

        if self.roots().iter().any(|root| Rc::ptr_eq(root, &top)) {
            Ok(node)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Checks one tree, returning its node count
    fn check_tree(node: &NodeRef<K>) -> Result<usize, InvariantViolation> {
        let node_ref = node.borrow();
        let mut nodes = 1;
        let mut children = 0;
        let mut cursor = node_ref.child.clone();

        while let Some(child) = cursor {
            {
                let child_ref = child.borrow();
                let linked_back = child_ref
                    .parent
                    .as_ref()
                    .and_then(Weak::upgrade)
                    .is_some_and(|parent| Rc::ptr_eq(&parent, node));
                if !linked_back {
                    return Err(InvariantViolation::BrokenParentLink);
                }
                if child_ref.key < node_ref.key {
                    return Err(InvariantViolation::HeapOrder);
                }
                if children >= node_ref.degree {
                    return Err(InvariantViolation::ChildCount {
                        degree: node_ref.degree,
                        children: children + 1,
                    });
                }
                let expected = node_ref.degree - children - 1;
                if child_ref.degree != expected {
                    return Err(InvariantViolation::ChildDegree {
                        expected,
                        found: child_ref.degree,
                    });
                }
                cursor = child_ref.sibling.clone();
            }
            children += 1;
            nodes += Self::check_tree(&child)?;
        }

        if children != node_ref.degree {
            return Err(InvariantViolation::ChildCount {
                degree: node_ref.degree,
                children,
            });
        }
        if 1usize.checked_shl(node_ref.degree as u32) != Some(nodes) {
            return Err(InvariantViolation::SubtreeSize {
                degree: node_ref.degree,
                nodes,
            });
        }
        Ok(nodes)
    }

    /// Panics on a broken invariant when built with `strict-invariants`
    fn assert_invariants(&self) {
        if cfg!(feature = "strict-invariants") {
            if let Err(violation) = self.check_invariants() {
                panic!("binomial heap invariant violated: {violation}");
            }
        }
    }
}

impl<K: Ord + fmt::Display> BinomialHeap<K> {
    /// Logs the heap through `tracing`, one line per root tree
    ///
    /// Each node is written depth-first as `<key> degree : <d> Parent : <p>`,
    /// with `-` for roots. This is a debugging aid, not a stable format.
    pub fn print_heap(&self) {
        for root in self.roots() {
            let mut line = String::new();
            if Self::write_tree(&root, &mut line).is_ok() {
                info!(target: "rust_binomial_heap::dump", "{line}");
            }
        }
    }

    fn write_tree<W: fmt::Write>(node: &NodeRef<K>, out: &mut W) -> fmt::Result {
        let node_ref = node.borrow();
        let parent = node_ref.parent.as_ref().and_then(Weak::upgrade);
        match &parent {
            Some(parent) => write!(
                out,
                "{} degree : {} Parent : {} ",
                node_ref.key,
                node_ref.degree,
                parent.borrow().key
            )?,
            None => write!(out, "{} degree : {} Parent : - ", node_ref.key, node_ref.degree)?,
        }

        let mut child = node_ref.child.clone();
        while let Some(current) = child {
            Self::write_tree(&current, out)?;
            child = current.borrow().sibling.clone();
        }
        Ok(())
    }
}

impl<K: Ord + fmt::Display> fmt::Display for BinomialHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, root) in self.roots().iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            Self::write_tree(root, f)?;
        }
        Ok(())
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for BinomialHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHeap")
            .field("len", &self.len)
            .field("minimum", &self.minimum())
            .field("root_degrees", &self.root_degrees())
            .finish()
    }
}

impl<K: Ord> Default for BinomialHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for BinomialHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = BinomialHeap::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord> Extend<K> for BinomialHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> Heap<K> for BinomialHeap<K> {
    fn new() -> Self {
        BinomialHeap::new()
    }

    fn is_empty(&self) -> bool {
        BinomialHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        BinomialHeap::len(self)
    }

    fn push(&mut self, key: K) {
        self.insert(key);
    }

    fn peek(&self) -> Option<&K> {
        self.minimum()
    }

    fn pop(&mut self) -> Option<K> {
        self.extract_min().ok().map(|node| node.key)
    }

    fn merge(&mut self, other: Self) {
        self.union(other);
    }
}

impl<K: Ord> SearchableHeap<K> for BinomialHeap<K> {
    type Handle = BinomialHandle<K>;

    fn find(&self, key: &K) -> Option<Self::Handle> {
        BinomialHeap::find(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        BinomialHeap::contains(self, key)
    }

    fn decrease_key(&mut self, target: &K, new_key: K) -> Result<Self::Handle, HeapError> {
        BinomialHeap::decrease_key(self, target, new_key)
    }

    fn delete(&mut self, key: &K) -> Result<K, HeapError> {
        BinomialHeap::delete(self, key)
    }
}
