//! Intrusive doubly linked lists over a fixed index space.
//!
//! A collection of capacity `K` lets every index in `[0, K)` belong to at most
//! one circular list at a time. Lists are identified by their head index,
//! which the caller stores; the collection itself only keeps the link cells.
//! Every operation is O(1), which is what lets the position resolvers insert a
//! vertex above or below an already placed vertex, and thread an edge order
//! through M insertions, without ever shuffling memory.

use crate::{GraphError, NIL};

#[derive(Debug, Clone)]
pub(crate) struct ListCollection {
    // [prev, next] per index; [NIL, NIL] marks a free index.
    links: Vec<[usize; 2]>,
}

impl ListCollection {
    pub fn new(capacity: usize) -> Result<Self, GraphError> {
        let mut links = Vec::new();
        links.try_reserve_exact(capacity)?;
        links.resize(capacity, [NIL, NIL]);
        Ok(ListCollection { links })
    }

    /// Puts every index back in the free state.
    #[allow(unused)]
    pub fn clear(&mut self) {
        self.links.fill([NIL, NIL]);
    }

    pub fn is_member(&self, i: usize) -> bool {
        self.links[i] != [NIL, NIL]
    }

    pub fn is_empty(&self, head: usize) -> bool {
        head == NIL
    }

    /// Appends `i` at the tail of the list identified by `head` and returns
    /// the head, which only changes when the list was empty.
    pub fn append(&mut self, head: usize, i: usize) -> usize {
        debug_assert!(!self.is_member(i));
        if head == NIL {
            self.links[i] = [i, i];
            i
        } else {
            let tail = self.links[head][0];
            self.links[tail][1] = i;
            self.links[i] = [tail, head];
            self.links[head][0] = i;
            head
        }
    }

    pub fn insert_after(&mut self, anchor: usize, i: usize) {
        debug_assert!(self.is_member(anchor) && !self.is_member(i));
        let next = self.links[anchor][1];
        self.links[anchor][1] = i;
        self.links[i] = [anchor, next];
        self.links[next][0] = i;
    }

    pub fn insert_before(&mut self, anchor: usize, i: usize) {
        debug_assert!(self.is_member(anchor) && !self.is_member(i));
        let prev = self.links[anchor][0];
        self.links[anchor][0] = i;
        self.links[i] = [prev, anchor];
        self.links[prev][1] = i;
    }

    /// Successor of `i` in the list headed by `head`, or NIL at the tail.
    pub fn get_next(&self, head: usize, i: usize) -> usize {
        debug_assert!(self.is_member(i));
        let next = self.links[i][1];
        if next == head {
            NIL
        } else {
            next
        }
    }

    /// Predecessor of `i` in the list headed by `head`, or NIL at the head.
    #[allow(unused)]
    pub fn get_prev(&self, head: usize, i: usize) -> usize {
        debug_assert!(self.is_member(i));
        if i == head {
            NIL
        } else {
            self.links[i][0]
        }
    }

    /// Unlinks `i` and returns the new head of the list it belonged to.
    pub fn remove(&mut self, head: usize, i: usize) -> usize {
        debug_assert!(self.is_member(i));
        let [prev, next] = self.links[i];
        self.links[i] = [NIL, NIL];
        if prev == i {
            // i was the sole member
            debug_assert_eq!(head, i);
            return NIL;
        }
        self.links[prev][1] = next;
        self.links[next][0] = prev;
        if i == head {
            next
        } else {
            head
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NIL;

    fn collect(lc: &ListCollection, head: usize) -> Vec<usize> {
        let mut out = vec![];
        if head == NIL {
            return out;
        }
        let mut i = head;
        while i != NIL {
            out.push(i);
            i = lc.get_next(head, i);
        }
        out
    }

    #[test]
    fn append_keeps_head() {
        let mut lc = ListCollection::new(5).unwrap();
        let mut head = NIL;
        assert!(lc.is_empty(head));
        for i in 0..5 {
            head = lc.append(head, i);
        }
        assert_eq!(head, 0);
        assert_eq!(collect(&lc, head), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn insert_before_and_after() {
        let mut lc = ListCollection::new(6).unwrap();
        let mut head = NIL;
        head = lc.append(head, 3);
        lc.insert_after(3, 4);
        lc.insert_before(3, 2);
        // 2 sits "before" the head circularly, so walking from the head gives
        // 3, 4, 2.
        assert_eq!(collect(&lc, head), vec![3, 4, 2]);
        // Walking from 2 as head instead puts it first.
        assert_eq!(collect(&lc, 2), vec![2, 3, 4]);
        assert_eq!(lc.get_prev(2, 3), 2);
        assert_eq!(lc.get_prev(2, 2), NIL);
    }

    #[test]
    fn remove_relinks_and_frees() {
        let mut lc = ListCollection::new(4).unwrap();
        let mut head = NIL;
        for i in 0..4 {
            head = lc.append(head, i);
        }
        head = lc.remove(head, 0);
        assert_eq!(head, 1);
        assert_eq!(collect(&lc, head), vec![1, 2, 3]);
        head = lc.remove(head, 2);
        assert_eq!(collect(&lc, head), vec![1, 3]);
        assert!(!lc.is_member(2));
        // A removed index can rejoin another list.
        lc.insert_after(3, 2);
        assert_eq!(collect(&lc, head), vec![1, 3, 2]);
        head = lc.remove(head, 1);
        head = lc.remove(head, 3);
        head = lc.remove(head, 2);
        assert_eq!(head, NIL);
    }
}
