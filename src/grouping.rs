//! Section grouping over bracket-indexed columns.
//!
//! A section of the export is a positional window of columns. Inside the
//! window, columns that share the same bracket index at the requested nesting
//! level belong to the same repetition of a record.

use std::collections::HashMap;

use crate::rows::Column;

/// Half-open positional window `[start, end)` with optional bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl Window {
    pub const ALL: Window = Window {
        start: None,
        end: None,
    };

    pub const fn new(start: usize, end: usize) -> Self {
        Window {
            start: Some(start),
            end: Some(end),
        }
    }

    pub const fn from(start: usize) -> Self {
        Window {
            start: Some(start),
            end: None,
        }
    }

    pub const fn until(end: usize) -> Self {
        Window {
            start: None,
            end: Some(end),
        }
    }

    /// Bounds past the slice length clamp; an inverted window is empty.
    pub fn slice<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        let len = items.len();
        let end = self.end.map_or(len, |end| end.min(len));
        let start = self.start.map_or(0, |start| start.min(end));
        &items[start..end]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group<'r, 'h> {
    pub index: usize,
    pub columns: Vec<&'r Column<'h>>,
}

/// Groups in first-seen index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Groups<'r, 'h> {
    groups: Vec<Group<'r, 'h>>,
}

impl<'r, 'h> Groups<'r, 'h> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Group<'r, 'h>> {
        self.groups.iter().find(|group| group.index == index)
    }

    pub fn first(&self) -> Option<&Group<'r, 'h>> {
        self.groups.first()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.groups.iter().map(|group| group.index).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group<'r, 'h>> {
        self.groups.iter()
    }
}

impl<'r, 'h> IntoIterator for Groups<'r, 'h> {
    type Item = Group<'r, 'h>;
    type IntoIter = std::vec::IntoIter<Group<'r, 'h>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Partitions the columns of `window` by their bracket index at `level`.
///
/// Columns shallower than `level` are skipped, as are null columns when
/// `ignore_null` is set.
pub fn group_section<'r, 'h>(
    columns: &[&'r Column<'h>],
    window: Window,
    level: usize,
    ignore_null: bool,
) -> Groups<'r, 'h> {
    let mut groups: Vec<Group<'r, 'h>> = Vec::new();
    let mut slots: HashMap<usize, usize> = HashMap::new();

    for column in window.slice(columns) {
        if ignore_null && column.is_null() {
            continue;
        }
        let Some(index) = column.group_index(level) else {
            continue;
        };
        match slots.get(&index) {
            Some(&slot) => groups[slot].columns.push(*column),
            None => {
                slots.insert(index, groups.len());
                groups.push(Group {
                    index,
                    columns: vec![*column],
                });
            }
        }
    }

    Groups { groups }
}
