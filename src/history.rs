use crate::Graph;

/// Bounded linear undo/redo history of graph snapshots.
///
/// Snapshots are owned copies, so later edits of the live graph never reach
/// them. Pushing after an undo discards every redo snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    snapshots: Vec<Graph>,
    cursor: usize,
    capacity: usize,
    /// Number of pushes so far.
    revision: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Graph::default(), crate::SettingsHistory::default().capacity)
    }
}

impl History {
    pub fn new(initial: Graph, capacity: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            capacity: capacity.max(1),
            revision: 0,
        }
    }

    /// Drops redo snapshots, appends `graph` and moves the cursor onto it.
    /// The oldest snapshot is evicted when capacity is exceeded.
    pub fn push(&mut self, graph: Graph) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(graph);

        if self.snapshots.len() > self.capacity {
            let excess = self.snapshots.len() - self.capacity;
            self.snapshots.drain(..excess);
        }

        self.cursor = self.snapshots.len() - 1;
        self.revision += 1;
    }

    /// Moves the cursor back and returns the snapshot under it.
    pub fn undo(&mut self) -> Option<&Graph> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Moves the cursor forward and returns the snapshot under it.
    pub fn redo(&mut self) -> Option<&Graph> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&Graph> {
        self.snapshots.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Increases with every push, also when eviction keeps `len` and `cursor` unchanged.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
