//! Fixed-capacity record of the cells an agent recently stepped onto.

use maze_chase_core::CellCoord;

/// Number of visited cells retained per agent.
pub const HISTORY_CAPACITY: usize = 5;

/// Ring buffer holding the most recent cells an agent moved onto.
///
/// Pushing beyond [`HISTORY_CAPACITY`] overwrites the oldest entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct History {
    slots: [Option<CellCoord>; HISTORY_CAPACITY],
    head: usize,
    len: usize,
}

impl History {
    /// Records a newly visited cell.
    pub fn push(&mut self, cell: CellCoord) {
        self.slots[self.head] = Some(cell);
        self.head = (self.head + 1) % HISTORY_CAPACITY;
        self.len = (self.len + 1).min(HISTORY_CAPACITY);
    }

    /// Number of recorded cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Reports whether nothing has been recorded yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Up to `count` most recent cells, newest first.
    pub fn latest(&self, count: usize) -> impl Iterator<Item = CellCoord> + '_ {
        let head = self.head;
        (1..=count.min(self.len)).filter_map(move |back| {
            let slot = (head + HISTORY_CAPACITY - back) % HISTORY_CAPACITY;
            self.slots[slot]
        })
    }

    /// Every recorded cell, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let mut ordered: Vec<CellCoord> = self.latest(self.len).collect();
        ordered.reverse();
        ordered.into_iter()
    }

    /// Reports whether `cell` is among the `count` most recent entries.
    #[must_use]
    pub fn visited_recently(&self, cell: CellCoord, count: usize) -> bool {
        self.latest(count).any(|recent| recent == cell)
    }
}
