//! Chain tracker for arc-based tour construction.
//!
//! A union-find over nodes where every component is an open path (chain).
//! Each root additionally records the chain's tail (the node without an
//! incoming arc) and head (the node without an outgoing arc), so the
//! builder can test "same chain" and "is this the tail" in near-constant
//! time instead of walking the partial tour.

/// Disjoint open chains with tail/head pointers per component.
#[derive(Debug, Clone)]
pub(crate) struct ChainTracker {
    parent: Vec<usize>,
    size: Vec<usize>,
    tail: Vec<usize>,
    head: Vec<usize>,
}

impl ChainTracker {
    /// Every node starts as its own single-node chain.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            tail: (0..n).collect(),
            head: (0..n).collect(),
        }
    }

    /// Root of the chain containing `x` (path halving).
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    pub fn same_chain(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// First node of the chain containing `x`.
    pub fn tail_of(&mut self, x: usize) -> usize {
        let r = self.find(x);
        self.tail[r]
    }

    /// Last node of the chain containing `x`.
    pub fn head_of(&mut self, x: usize) -> usize {
        let r = self.find(x);
        self.head[r]
    }

    /// Number of nodes on the chain containing `x`.
    pub fn chain_len(&mut self, x: usize) -> usize {
        let r = self.find(x);
        self.size[r]
    }

    /// Joins the chain ending at `u` to the chain starting at `v` via arc u→v.
    ///
    /// The merged chain keeps the tail of `u`'s chain and the head of `v`'s
    /// chain. Merging a chain with itself is a no-op.
    pub fn link(&mut self, u: usize, v: usize) {
        let (ru, rv) = (self.find(u), self.find(v));
        if ru == rv {
            return;
        }
        let (tail, head) = (self.tail[ru], self.head[rv]);
        let (big, small) = if self.size[ru] >= self.size[rv] {
            (ru, rv)
        } else {
            (rv, ru)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.tail[big] = tail;
        self.head[big] = head;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut c = ChainTracker::new(3);
        for i in 0..3 {
            assert_eq!(c.tail_of(i), i);
            assert_eq!(c.head_of(i), i);
            assert_eq!(c.chain_len(i), 1);
        }
        assert!(!c.same_chain(0, 1));
    }

    #[test]
    fn test_link_sets_tail_and_head() {
        let mut c = ChainTracker::new(4);
        c.link(0, 1); // 0 -> 1
        c.link(2, 0); // 2 -> 0 -> 1
        assert!(c.same_chain(2, 1));
        assert_eq!(c.tail_of(1), 2);
        assert_eq!(c.head_of(2), 1);
        assert_eq!(c.chain_len(0), 3);

        c.link(1, 3); // 2 -> 0 -> 1 -> 3
        assert_eq!(c.tail_of(3), 2);
        assert_eq!(c.head_of(0), 3);
        assert_eq!(c.chain_len(3), 4);
    }

    #[test]
    fn test_link_smaller_into_larger_keeps_orientation() {
        let mut c = ChainTracker::new(5);
        c.link(1, 2);
        c.link(2, 3); // 1 -> 2 -> 3
        c.link(0, 1); // small chain {0} in front of a larger one
        assert_eq!(c.tail_of(3), 0);
        assert_eq!(c.head_of(0), 3);
        c.link(3, 4);
        assert_eq!(c.head_of(1), 4);
        assert_eq!(c.tail_of(4), 0);
    }

    #[test]
    fn test_self_link_is_noop() {
        let mut c = ChainTracker::new(2);
        c.link(0, 1);
        c.link(1, 0);
        assert_eq!(c.tail_of(0), 0);
        assert_eq!(c.head_of(0), 1);
        assert_eq!(c.chain_len(1), 2);
    }
}
