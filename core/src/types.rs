use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Cells within this Manhattan distance of the first action never hold a mine.
pub const SAFE_RADIUS: Coord = 2;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub const fn manhattan_distance(a: Coord2, b: Coord2) -> CellCount {
    (a.0.abs_diff(b.0) as CellCount) + (a.1.abs_diff(b.1) as CellCount)
}

pub const fn in_safe_zone(coords: Coord2, start: Coord2) -> bool {
    manhattan_distance(coords, start) <= SAFE_RADIUS as CellCount
}

/// Number of cells of a `size` grid that lie outside the safe zone around `start`.
pub fn cells_outside_safe_zone(size: Coord2, start: Coord2) -> CellCount {
    let radius = i16::from(SAFE_RADIUS);
    let (rows, cols) = (i16::from(size.0), i16::from(size.1));
    let mut inside: CellCount = 0;

    for d_row in -radius..=radius {
        let span = radius - d_row.abs();
        for d_col in -span..=span {
            let row = i16::from(start.0) + d_row;
            let col = i16::from(start.1) + d_col;
            if (0..rows).contains(&row) && (0..cols).contains(&col) {
                inside += 1;
            }
        }
    }

    mult(size.0, size.1).saturating_sub(inside)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let bounds = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, bounds)
    }
}

/// Moore neighborhood offsets, `(d_row, d_col)`.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the in-bounds cells of the Moore neighborhood around `center`.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
