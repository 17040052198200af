//! Puzzle state representation and successor generation.

use std::{cell::Cell, fmt, rc::Rc, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    Error, Result,
    identifiers::{BoardKey, PathId},
};

/// Number of cells on the 3×3 board.
pub const BOARD_CELLS: usize = 9;

/// Board width/height.
pub const BOARD_SIDE: usize = 3;

/// A single state of the 8-puzzle.
///
/// Tiles are stored row-major as a permutation of `0..=8`, with `0` standing
/// for the blank. A state generated during a search carries a non-owning
/// back-reference to the state it was generated from; the parent relation is
/// only ever walked upward (path reconstruction, identifier generation) —
/// children are never enumerated from a parent.
///
/// The tile array is immutable once a state enters a search; the editor
/// operations ([`set_tile`](Self::set_tile) and friends) exist for
/// configuring the initial and goal boards before a run. Expansion order and
/// the cached heuristic estimate are assigned after construction and use
/// interior mutability so shared (`Rc`) states can be annotated in place.
#[derive(Debug, Clone)]
pub struct PuzzleState {
    tiles: [u8; BOARD_CELLS],
    depth: u32,
    parent: Option<Rc<PuzzleState>>,
    expansion_order: Cell<u32>,
    heuristic_value: Cell<Option<u32>>,
}

impl PuzzleState {
    /// Create the default (solved) board `1 2 3 / 4 5 6 / 7 8 _`.
    pub fn new() -> Self {
        Self {
            tiles: [1, 2, 3, 4, 5, 6, 7, 8, 0],
            depth: 0,
            parent: None,
            expansion_order: Cell::new(0),
            heuristic_value: Cell::new(None),
        }
    }

    /// Create a root state from an explicit tile arrangement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAPermutation`] unless `tiles` uses each value
    /// 0 through 8 exactly once.
    pub fn from_tiles(tiles: [u8; BOARD_CELLS]) -> Result<Self> {
        validate_permutation(&tiles)?;
        let mut state = Self::new();
        state.tiles = tiles;
        Ok(state)
    }

    /// Copy of this state suitable for seeding a fresh search run: same
    /// board, depth 0, no parent, no run annotations.
    pub fn fresh_copy(&self) -> Self {
        let mut state = Self::new();
        state.tiles = self.tiles;
        state
    }

    fn child_of(parent: &Rc<PuzzleState>) -> Self {
        Self {
            tiles: parent.tiles,
            depth: parent.depth + 1,
            parent: Some(Rc::clone(parent)),
            expansion_order: Cell::new(0),
            heuristic_value: Cell::new(None),
        }
    }

    /// Generate the successor states reachable by one blank slide.
    ///
    /// The blank is located by scanning the grid; successors are produced in
    /// the fixed order left, right, up, down, skipping moves that would leave
    /// the grid. Every successor has `depth = self.depth + 1` and a parent
    /// link back to `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBlank`] if the board holds no blank tile,
    /// which indicates a broken permutation invariant.
    pub fn successors(self: &Rc<Self>) -> Result<Vec<Rc<PuzzleState>>> {
        let blank = self.blank_index()?;
        let (x, y) = (blank % BOARD_SIDE, blank / BOARD_SIDE);

        let mut successors = Vec::with_capacity(4);
        let mut slide = |nx: usize, ny: usize| {
            let mut child = PuzzleState::child_of(self);
            child.tiles.swap(blank, nx + ny * BOARD_SIDE);
            successors.push(Rc::new(child));
        };

        if x > 0 {
            slide(x - 1, y);
        }
        if x < BOARD_SIDE - 1 {
            slide(x + 1, y);
        }
        if y > 0 {
            slide(x, y - 1);
        }
        if y < BOARD_SIDE - 1 {
            slide(x, y + 1);
        }

        Ok(successors)
    }

    fn blank_index(&self) -> Result<usize> {
        self.tiles
            .iter()
            .position(|&t| t == 0)
            .ok_or(Error::MissingBlank)
    }

    /// Get the tile value at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfBounds`] when either coordinate exceeds 2.
    pub fn get_tile(&self, x: usize, y: usize) -> Result<u8> {
        check_bounds(x, y)?;
        Ok(self.tiles[x + y * BOARD_SIDE])
    }

    /// Set the tile at `(x, y)` to `value`, preserving the permutation
    /// invariant by swapping: the cell that currently holds `value` receives
    /// the old value of `(x, y)`. Setting a cell to its current value is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfBounds`] or
    /// [`Error::TileValueOutOfBounds`] for bad inputs, and
    /// [`Error::TileNotFound`] if `value` is absent from the board (a broken
    /// invariant).
    pub fn set_tile(&mut self, x: usize, y: usize, value: u8) -> Result<()> {
        check_bounds(x, y)?;
        if value as usize >= BOARD_CELLS {
            return Err(Error::TileValueOutOfBounds { value });
        }

        let index = x + y * BOARD_SIDE;
        if self.tiles[index] == value {
            return Ok(());
        }

        let other = self
            .tiles
            .iter()
            .position(|&t| t == value)
            .ok_or(Error::TileNotFound { value })?;
        self.tiles.swap(index, other);
        Ok(())
    }

    /// Replace all nine tiles at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAPermutation`] unless `tiles` has nine entries
    /// using each value 0 through 8 exactly once.
    pub fn set_tiles(&mut self, tiles: &[u8]) -> Result<()> {
        let tiles: [u8; BOARD_CELLS] = tiles.try_into().map_err(|_| Error::NotAPermutation)?;
        validate_permutation(&tiles)?;
        self.tiles = tiles;
        Ok(())
    }

    /// Unconditionally exchange the values of two cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfBounds`] if either coordinate pair is
    /// off the grid.
    pub fn swap_tiles(&mut self, a: (usize, usize), b: (usize, usize)) -> Result<()> {
        check_bounds(a.0, a.1)?;
        check_bounds(b.0, b.1)?;
        self.tiles.swap(a.0 + a.1 * BOARD_SIDE, b.0 + b.1 * BOARD_SIDE);
        Ok(())
    }

    /// Board-configuration equality: compares tile sequences only, ignoring
    /// depth, path, and annotations.
    pub fn same_board(&self, other: &PuzzleState) -> bool {
        self.tiles == other.tiles
    }

    /// The raw tile array, row-major.
    pub fn tiles(&self) -> &[u8; BOARD_CELLS] {
        &self.tiles
    }

    /// Path length from the initial state.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The state this one was generated from, if any.
    pub fn parent(&self) -> Option<&Rc<PuzzleState>> {
        self.parent.as_ref()
    }

    /// Order in which this state was expanded; 0 until assigned.
    pub fn expansion_order(&self) -> u32 {
        self.expansion_order.get()
    }

    pub fn set_expansion_order(&self, value: u32) {
        self.expansion_order.set(value);
    }

    /// Cached heuristic estimate, if one has been computed.
    pub fn heuristic_value(&self) -> Option<u32> {
        self.heuristic_value.get()
    }

    pub fn set_heuristic_value(&self, value: Option<u32>) {
        self.heuristic_value.set(value);
    }

    /// Canonical board-only key: the nine tile digits in row-major order.
    pub fn board_key(&self) -> BoardKey {
        let mut s = String::with_capacity(BOARD_CELLS);
        for &t in &self.tiles {
            s.push((b'0' + t) as char);
        }
        BoardKey::new(s)
    }

    /// Path-qualified identifier: the board key of every ancestor from the
    /// root down to this state, `:`-separated. Uniquely identifies a path,
    /// not just a board.
    pub fn long_identifier(&self) -> PathId {
        let mut keys = vec![self.board_key()];
        let mut ancestor = self.parent.as_deref();
        while let Some(state) = ancestor {
            keys.push(state.board_key());
            ancestor = state.parent.as_deref();
        }
        keys.reverse();
        let joined = keys
            .iter()
            .map(BoardKey::as_str)
            .collect::<Vec<_>>()
            .join(":");
        PathId::new(joined)
    }
}

impl Default for PuzzleState {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PuzzleState {
    fn drop(&mut self) {
        // Parent chains grow one link per depth level; dropping the last
        // handle to a deep state must not recurse down the whole chain.
        // Unlink ancestors into a loop variable while this drop is the only
        // remaining owner.
        let mut ancestor = self.parent.take();
        while let Some(shared) = ancestor {
            ancestor = match Rc::try_unwrap(shared) {
                Ok(mut state) => state.parent.take(),
                Err(_) => None,
            };
        }
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for &t in &self.tiles {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{t}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for PuzzleState {
    type Err = Error;

    /// Parse a comma-separated tile list, e.g. `0,2,3,1,4,5,8,7,6`.
    fn from_str(s: &str) -> Result<Self> {
        let parse_err = |reason: &str| Error::ParseBoard {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let mut tiles = Vec::with_capacity(BOARD_CELLS);
        for part in s.split(',') {
            let value: u8 = part
                .trim()
                .parse()
                .map_err(|_| parse_err("tiles must be integers 0-8"))?;
            tiles.push(value);
        }
        if tiles.len() != BOARD_CELLS {
            return Err(parse_err("expected exactly 9 comma-separated tiles"));
        }
        let tiles: [u8; BOARD_CELLS] = tiles
            .try_into()
            .map_err(|_| parse_err("expected exactly 9 comma-separated tiles"))?;
        validate_permutation(&tiles)
            .map_err(|_| parse_err("tiles must use each value 0-8 exactly once"))?;
        Self::from_tiles(tiles)
    }
}

// Only the board itself is persisted; depth, parentage, and run annotations
// are per-search data that never leave memory.
impl Serialize for PuzzleState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.tiles.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PuzzleState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tiles = <[u8; BOARD_CELLS]>::deserialize(deserializer)?;
        PuzzleState::from_tiles(tiles).map_err(serde::de::Error::custom)
    }
}

fn check_bounds(x: usize, y: usize) -> Result<()> {
    if x >= BOARD_SIDE || y >= BOARD_SIDE {
        return Err(Error::PositionOutOfBounds { x, y });
    }
    Ok(())
}

fn validate_permutation(tiles: &[u8; BOARD_CELLS]) -> Result<()> {
    let mut seen = [false; BOARD_CELLS];
    for &t in tiles {
        if t as usize >= BOARD_CELLS || seen[t as usize] {
            return Err(Error::NotAPermutation);
        }
        seen[t as usize] = true;
    }
    Ok(())
}
