//! Bracket-indexed column paths such as `FormaPago[3][1]`.
//!
//! The export flattens repeated XML nodes into columns whose names carry one
//! bracketed index per nesting level. The base name identifies the field and
//! the indices identify which repetition (and sub-repetition) it belongs to.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPath {
    pub base: String,
    pub indices: Vec<usize>,
}

impl ColumnPath {
    /// Parses every bracket level of `path`.
    ///
    /// Bracket contents that are not non-negative integers end the index list,
    /// so `Campo[1][x][3]` yields `[1]`.
    pub fn parse(path: &str) -> Self {
        let indices = (1..)
            .map_while(|level| group_index(path, level))
            .collect();
        ColumnPath {
            base: base_name(path).to_string(),
            indices,
        }
    }

    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Index at the 1-indexed nesting `level`, if the path is that deep.
    pub fn index_at(&self, level: usize) -> Option<usize> {
        level
            .checked_sub(1)
            .and_then(|slot| self.indices.get(slot))
            .copied()
    }
}

/// Text before the first `[`, trimmed.
pub fn base_name(path: &str) -> &str {
    path.split('[').next().unwrap_or_default().trim()
}

/// Integer inside the `level`-th bracket pair (1-indexed).
///
/// Returns `None` when the path is shallower than `level`, when `level` is 0,
/// or when the bracket does not hold a non-negative integer.
pub fn group_index(path: &str, level: usize) -> Option<usize> {
    if level == 0 {
        return None;
    }
    let segment = path.split('[').nth(level)?;
    let (inner, _) = segment.split_once(']')?;
    inner.trim().parse().ok()
}
