use std::ops::Index;

/// Index of the root node, which heads the list of uncovered columns.
pub const ROOT: usize = 0;

/// A node in the four-way linked mesh. Links are indices into [`Nodes`].
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
pub struct Node {
    pub left: usize,
    pub right: usize,
    pub up: usize,
    pub down: usize,

    /// Index of the column header this node belongs to. Headers point at
    /// themselves.
    pub header: usize,
    /// Row id of a data node, `0` for the root and headers.
    pub row: usize,
}

impl Node {
    fn new_self_ref(index: usize, header: usize, row: usize) -> Self {
        Node {
            left: index,
            right: index,
            up: index,
            down: index,
            header,
            row,
        }
    }
}

/// Arena of nodes, addressed by index.
#[derive(Debug, Default)]
pub struct Nodes(Vec<Node>);

impl Index<usize> for Nodes {
    type Output = Node;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Nodes {
    /// Append a node which is linked only to itself and return its index.
    ///
    /// A `header` of `None` makes the node its own header.
    pub fn push(&mut self, header: Option<usize>, row: usize) -> usize {
        let index = self.0.len();
        self.0
            .push(Node::new_self_ref(index, header.unwrap_or(index), row));

        index
    }

    pub fn walk_right(&self, start: usize) -> Walk<'_> {
        Walk {
            nodes: self,
            original: start,
            current: start,
            direction: |node: &Node| node.right,
        }
    }

    pub fn walk_down(&self, start: usize) -> Walk<'_> {
        Walk {
            nodes: self,
            original: start,
            current: start,
            direction: |node: &Node| node.down,
        }
    }
}

macro_rules! insert_direction {
    ($name:ident, $towards:ident, $away:ident) => {
        /// Link `neighbor` in immediately next to `index`, between `index`
        /// and its current neighbor on that side.
        pub fn $name(&mut self, index: usize, neighbor: usize) {
            let outer = self.0[index].$towards;

            self.0[neighbor].$towards = outer;
            self.0[neighbor].$away = index;
            self.0[outer].$away = neighbor;
            self.0[index].$towards = neighbor;
        }
    };
}

// NOTE: Splicing a node out leaves its own links untouched, which is what lets
// the matching `uncover_*` call put it back in the same place. Covers must be
// undone in reverse order for this to hold.
macro_rules! splice_direction {
    ($cover:ident, $uncover:ident, $prev:ident, $next:ident) => {
        pub fn $cover(&mut self, index: usize) {
            let Node {
                $prev: prev,
                $next: next,
                ..
            } = self.0[index];

            self.0[prev].$next = next;
            self.0[next].$prev = prev;
        }

        pub fn $uncover(&mut self, index: usize) {
            let Node {
                $prev: prev,
                $next: next,
                ..
            } = self.0[index];

            self.0[prev].$next = index;
            self.0[next].$prev = index;
        }
    };
}

impl Nodes {
    insert_direction!(add_left, left, right);

    insert_direction!(add_above, up, down);

    splice_direction!(cover_horizontal, uncover_horizontal, left, right);

    splice_direction!(cover_vertical, uncover_vertical, up, down);
}

/// Iterator over the nodes reached by repeatedly following one link, stopping
/// before it returns to the starting node.
#[derive(Debug)]
pub struct Walk<'a> {
    nodes: &'a Nodes,
    original: usize,
    current: usize,
    direction: fn(&Node) -> usize,
}

impl Iterator for Walk<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let next = (self.direction)(&self.nodes[self.current]);

        if next == self.original {
            None
        } else {
            self.current = next;

            Some(next)
        }
    }
}
