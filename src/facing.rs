use core::fmt;
use grid_util::Point;

/// One of the four cardinal directions an agent on the grid can face. Rows grow downwards, so
/// [Facing::North] decreases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    /// All facings in clockwise order starting from [Facing::North].
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Unit movement vector as `(dx, dy)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::East => (1, 0),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
        }
    }

    /// The cell one step ahead of `cell` when facing this way.
    pub fn step(self, cell: Point) -> Point {
        let (dx, dy) = self.delta();
        Point::new(cell.x + dx, cell.y + dy)
    }

    /// Quarter turn counter-clockwise.
    pub fn rotate_left(self) -> Facing {
        match self {
            Facing::North => Facing::West,
            Facing::East => Facing::North,
            Facing::South => Facing::East,
            Facing::West => Facing::South,
        }
    }

    /// Quarter turn clockwise.
    pub fn rotate_right(self) -> Facing {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    pub fn opposite(self) -> Facing {
        self.rotate_right().rotate_right()
    }

    /// Minimum number of quarter turns needed to go from this facing to `other`.
    pub fn turns_to(self, other: Facing) -> u32 {
        if self == other {
            0
        } else if self.opposite() == other {
            2
        } else {
            1
        }
    }

    /// Symbol used when overlaying a path on a rendered grid.
    pub fn symbol(self) -> char {
        match self {
            Facing::North => '^',
            Facing::East => '>',
            Facing::South => 'v',
            Facing::West => '<',
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
