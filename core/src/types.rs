/// Single coordinate axis used for the grid side and cell positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(col, row)`.
pub type Coord2 = (Coord, Coord);

/// Identity of one grid cell, row-major in `[0, grid_size²)`.
pub type CellIndex = u16;

/// Count type used for total-cell counts.
pub type CellCount = u16;

/// Generation token carried by every scheduled continuation.
pub type Epoch = u64;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait ToCellIndex {
    fn to_cell_index(self, grid_size: Coord) -> CellIndex;
}

impl ToCellIndex for Coord2 {
    fn to_cell_index(self, grid_size: Coord) -> CellIndex {
        let (col, row) = self;
        mult(row, grid_size) + CellIndex::from(col)
    }
}

pub trait ToCoord2 {
    fn to_coord2(self, grid_size: Coord) -> Coord2;
}

impl ToCoord2 for CellIndex {
    fn to_coord2(self, grid_size: Coord) -> Coord2 {
        let side = CellIndex::from(grid_size.max(1));
        // both parts are below `side`, which fits a `Coord`
        ((self % side) as Coord, (self / side) as Coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_map_row_major() {
        assert_eq!((0, 0).to_cell_index(3), 0);
        assert_eq!((2, 0).to_cell_index(3), 2);
        assert_eq!((0, 1).to_cell_index(3), 3);
        assert_eq!((2, 2).to_cell_index(3), 8);
        assert_eq!(5_u16.to_coord2(3), (2, 1));
        assert_eq!(7_u16.to_coord2(3), (1, 2));
    }
}
