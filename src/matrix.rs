//! The dancing-links sparse bit-matrix: nodes, column headers, row heads, a root sentinel,
//! and the cover/uncover operations. Generic over the candidate/constraint identifier types
//! so the engine itself stays problem-agnostic -- only `rules` and `solver` know this is Sudoku.
//!
//! Implemented as a single arena (`Vec<Node<C, K>>`) with all neighbour references kept as
//! plain `usize` indices into that arena. The pointer graph is inherently cyclic (Knuth-style
//! circular doubly-linked lists), which an index arena sidesteps without `Rc`/`RefCell`/unsafe.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
enum NodeKind<C, K> {
    Root,
    ColumnHeader { constraint: K, size: usize },
    RowHead { candidate: C },
    Entry { row_head: usize, column_header: usize },
}

#[derive(Debug, Clone)]
struct Node<C, K> {
    up: usize,
    down: usize,
    left: usize,
    right: usize,
    kind: NodeKind<C, K>,
}

impl<C, K> Node<C, K> {
    fn singleton(kind: NodeKind<C, K>, idx: usize) -> Self {
        Node {
            up: idx,
            down: idx,
            left: idx,
            right: idx,
            kind,
        }
    }
}

/// A row head reachable from the currently-chosen column, paired with the candidate it
/// labels. `row_head` is the opaque handle `cover`/`uncover` operate on.
#[derive(Debug, Clone)]
pub struct CandidateRef<C> {
    pub candidate: C,
    row_head: usize,
}

struct Frame {
    columns: Vec<usize>,
    rows: Vec<usize>,
    removed_row_nodes: Vec<usize>,
    removed_column_nodes: Vec<usize>,
}

/// The dancing-links constraint matrix. `C` is the candidate id type (rows), `K` is the
/// constraint id type (columns).
pub struct ConstraintMatrix<C, K> {
    nodes: Vec<Node<C, K>>,
    column_index: HashMap<K, usize>,
    row_index: HashMap<C, usize>,
    history: Vec<Frame>,
}

impl<C, K> ConstraintMatrix<C, K>
where
    C: Clone + Eq + Hash + Debug,
    K: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        ConstraintMatrix {
            nodes: vec![Node::singleton(NodeKind::Root, ROOT)],
            column_index: HashMap::new(),
            row_index: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Inserts a node at the intersection of `candidate` and each of `constraints`, creating
    /// the column header / row head on first mention. Call order fixes the tie-break order
    /// used by `choose_column`.
    pub fn add(&mut self, candidate: C, constraints: impl IntoIterator<Item = K>) {
        let row_head = self.get_or_create_row_head(candidate);
        for constraint in constraints {
            let col = self.get_or_create_column_header(constraint);
            self.insert_entry(row_head, col);
        }
    }

    /// True iff no constraints remain (every column has been covered).
    pub fn solved(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }

    /// True iff no candidates remain (every row head has been covered).
    pub fn exhausted(&self) -> bool {
        self.nodes[ROOT].down == ROOT
    }

    /// The still-linked column header with minimum size, ties broken by first occurrence
    /// in the header ring (the "S-heuristic"). Panics if there are no columns left --
    /// callers must check `solved()`/`exhausted()` first.
    pub fn choose_column(&self) -> ColumnHandle {
        let mut best = self.nodes[ROOT].right;
        debug_assert_ne!(best, ROOT, "choose_column called on a solved matrix");
        let mut best_size = self.column_size(best);
        let mut cur = self.nodes[best].right;
        while cur != ROOT {
            let size = self.column_size(cur);
            if size < best_size {
                best = cur;
                best_size = size;
            }
            cur = self.nodes[cur].right;
        }
        ColumnHandle(best)
    }

    /// The row head of every live entry in `column`, top-to-bottom, snapshotted before any
    /// mutation so the caller may safely `cover` candidates while iterating the result.
    pub fn candidates_of(&self, column: ColumnHandle) -> Vec<CandidateRef<C>> {
        let col = column.0;
        let mut out = Vec::new();
        let mut cur = self.nodes[col].down;
        while cur != col {
            let row_head = self.entry_row_head(cur);
            let candidate = self.row_head_candidate(row_head).clone();
            out.push(CandidateRef { candidate, row_head });
            cur = self.nodes[cur].down;
        }
        out
    }

    /// Covers the row labelled by `candidate_ref`: removes every column it satisfies and
    /// every row that shares any of those columns. See module docs / SPEC_FULL.md section 4.2
    /// for the exact four-step algorithm this implements.
    pub fn cover(&mut self, candidate_ref: &CandidateRef<C>) {
        let row_head = candidate_ref.row_head;
        debug!("covering {:?}", candidate_ref.candidate);

        // Step 1: C = columns touched by this row's entries.
        let columns = self.collect_row_columns(row_head);

        // Step 2: R = rows touching any column in C, deduplicated in first-seen order.
        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for &col in &columns {
            let mut cur = self.nodes[col].down;
            while cur != col {
                let rh = self.entry_row_head(cur);
                if seen.insert(rh) {
                    rows.push(rh);
                }
                cur = self.nodes[cur].down;
            }
        }

        // Snapshot the affected entry set in both dimensions before mutating anything --
        // once step 3 starts unlinking, the columns' own down-chains go empty.
        let removed_row_nodes = self.collect_rows_entries(&rows);
        let removed_column_nodes = self.collect_columns_entries(&columns);

        // Step 3: unlink every row's entries vertically (detach from their columns),
        // decrementing column sizes, then unlink the row heads themselves.
        for &node in &removed_row_nodes {
            self.unlink_vertical(node);
            let col = self.entry_column(node);
            self.decrement_column_size(col);
        }
        for &rh in &rows {
            self.unlink_vertical(rh);
        }

        // Step 4: unlink every column's entries horizontally (detach from their rows),
        // then unlink the column headers themselves.
        for &node in &removed_column_nodes {
            self.unlink_horizontal(node);
        }
        for &col in &columns {
            self.unlink_horizontal(col);
        }

        self.history.push(Frame {
            columns,
            rows,
            removed_row_nodes,
            removed_column_nodes,
        });
    }

    /// Reverses the most recent `cover` exactly, in the opposite order of removal.
    pub fn uncover(&mut self) {
        let frame = self
            .history
            .pop()
            .expect("uncover called with no outstanding cover");

        for &col in frame.columns.iter().rev() {
            self.relink_horizontal(col);
        }
        for &node in frame.removed_column_nodes.iter().rev() {
            self.relink_horizontal(node);
        }
        for &rh in frame.rows.iter().rev() {
            self.relink_vertical(rh);
        }
        for &node in frame.removed_row_nodes.iter().rev() {
            self.relink_vertical(node);
            let col = self.entry_column(node);
            self.increment_column_size(col);
        }
    }

    // -- internal helpers -------------------------------------------------

    fn get_or_create_column_header(&mut self, constraint: K) -> usize {
        if let Some(&idx) = self.column_index.get(&constraint) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(Node::singleton(
            NodeKind::ColumnHeader {
                constraint: constraint.clone(),
                size: 0,
            },
            idx,
        ));
        self.append_ring_horizontal(ROOT, idx);
        self.column_index.insert(constraint, idx);
        idx
    }

    fn get_or_create_row_head(&mut self, candidate: C) -> usize {
        if let Some(&idx) = self.row_index.get(&candidate) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(Node::singleton(
            NodeKind::RowHead {
                candidate: candidate.clone(),
            },
            idx,
        ));
        self.append_ring_vertical(ROOT, idx);
        self.row_index.insert(candidate, idx);
        idx
    }

    fn insert_entry(&mut self, row_head: usize, col: usize) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node::singleton(
            NodeKind::Entry {
                row_head,
                column_header: col,
            },
            idx,
        ));
        self.append_ring_vertical(col, idx);
        self.append_ring_horizontal(row_head, idx);
        self.increment_column_size(col);
        idx
    }

    /// Appends `idx` just before `anchor` in `anchor`'s right-threaded ring (i.e. at the tail).
    fn append_ring_horizontal(&mut self, anchor: usize, idx: usize) {
        let last = self.nodes[anchor].left;
        self.nodes[last].right = idx;
        self.nodes[idx].left = last;
        self.nodes[idx].right = anchor;
        self.nodes[anchor].left = idx;
    }

    /// Appends `idx` just above `anchor` in `anchor`'s down-threaded ring (i.e. at the tail).
    fn append_ring_vertical(&mut self, anchor: usize, idx: usize) {
        let last = self.nodes[anchor].up;
        self.nodes[last].down = idx;
        self.nodes[idx].up = last;
        self.nodes[idx].down = anchor;
        self.nodes[anchor].up = idx;
    }

    fn unlink_vertical(&mut self, idx: usize) {
        let up = self.nodes[idx].up;
        let down = self.nodes[idx].down;
        self.nodes[up].down = down;
        self.nodes[down].up = up;
    }

    fn unlink_horizontal(&mut self, idx: usize) {
        let left = self.nodes[idx].left;
        let right = self.nodes[idx].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;
    }

    fn relink_vertical(&mut self, idx: usize) {
        let up = self.nodes[idx].up;
        let down = self.nodes[idx].down;
        self.nodes[up].down = idx;
        self.nodes[down].up = idx;
    }

    fn relink_horizontal(&mut self, idx: usize) {
        let left = self.nodes[idx].left;
        let right = self.nodes[idx].right;
        self.nodes[left].right = idx;
        self.nodes[right].left = idx;
    }

    fn collect_row_columns(&self, row_head: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = self.nodes[row_head].right;
        while cur != row_head {
            out.push(self.entry_column(cur));
            cur = self.nodes[cur].right;
        }
        out
    }

    fn collect_rows_entries(&self, rows: &[usize]) -> Vec<usize> {
        let mut out = Vec::new();
        for &rh in rows {
            let mut cur = self.nodes[rh].right;
            while cur != rh {
                out.push(cur);
                cur = self.nodes[cur].right;
            }
        }
        out
    }

    fn collect_columns_entries(&self, columns: &[usize]) -> Vec<usize> {
        let mut out = Vec::new();
        for &col in columns {
            let mut cur = self.nodes[col].down;
            while cur != col {
                out.push(cur);
                cur = self.nodes[cur].down;
            }
        }
        out
    }

    fn entry_row_head(&self, idx: usize) -> usize {
        match self.nodes[idx].kind {
            NodeKind::Entry { row_head, .. } => row_head,
            _ => unreachable!("expected an entry node"),
        }
    }

    fn entry_column(&self, idx: usize) -> usize {
        match self.nodes[idx].kind {
            NodeKind::Entry { column_header, .. } => column_header,
            _ => unreachable!("expected an entry node"),
        }
    }

    fn row_head_candidate(&self, idx: usize) -> &C {
        match &self.nodes[idx].kind {
            NodeKind::RowHead { candidate } => candidate,
            _ => unreachable!("expected a row head node"),
        }
    }

    fn column_size(&self, idx: usize) -> usize {
        match self.nodes[idx].kind {
            NodeKind::ColumnHeader { size, .. } => size,
            _ => unreachable!("expected a column header node"),
        }
    }

    fn decrement_column_size(&mut self, idx: usize) {
        if let NodeKind::ColumnHeader { size, .. } = &mut self.nodes[idx].kind {
            *size -= 1;
        }
    }

    fn increment_column_size(&mut self, idx: usize) {
        if let NodeKind::ColumnHeader { size, .. } = &mut self.nodes[idx].kind {
            *size += 1;
        }
    }

    #[cfg(test)]
    fn column_count(&self) -> usize {
        let mut n = 0;
        let mut cur = self.nodes[ROOT].right;
        while cur != ROOT {
            n += 1;
            cur = self.nodes[cur].right;
        }
        n
    }

    #[cfg(test)]
    fn row_count(&self) -> usize {
        let mut n = 0;
        let mut cur = self.nodes[ROOT].down;
        while cur != ROOT {
            n += 1;
            cur = self.nodes[cur].down;
        }
        n
    }

    #[cfg(test)]
    fn total_entry_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Entry { .. }))
            .count()
    }

    /// Checks the four structural invariants from SPEC_FULL.md section 3 for every
    /// currently-live node. Intended for tests, not for the hot cover/uncover path.
    #[cfg(test)]
    fn check_invariants(&self) {
        for (idx, node) in self.nodes.iter().enumerate() {
            assert_eq!(self.nodes[node.left].right, idx);
            assert_eq!(self.nodes[node.right].left, idx);
            assert_eq!(self.nodes[node.up].down, idx);
            assert_eq!(self.nodes[node.down].up, idx);
        }
        let mut cur = self.nodes[ROOT].right;
        while cur != ROOT {
            let mut count = 0;
            let mut c = self.nodes[cur].down;
            while c != cur {
                count += 1;
                c = self.nodes[c].down;
            }
            assert_eq!(self.column_size(cur), count);
            cur = self.nodes[cur].right;
        }
    }
}

impl<C, K> Default for ConstraintMatrix<C, K>
where
    C: Clone + Eq + Hash + Debug,
    K: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque reference to a column header, returned by `choose_column` and consumed by
/// `candidates_of`. Never exposes the underlying arena index to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnHandle(usize);
