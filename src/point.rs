use crate::Point;

pub const BOARD_SIZE: i8 = 8;

/// Whether both coordinates lie in `[0, 8)`.
pub fn is_valid(pos: Point) -> bool {
    (0..BOARD_SIZE).contains(&pos.0) && (0..BOARD_SIZE).contains(&pos.1)
}

/// Displacement vector from `a` to `b`.
pub fn difference(a: Point, b: Point) -> Point {
    (b.0 - a.0, b.1 - a.1)
}

/// `pos` shifted by `vector`.
pub fn add(pos: Point, vector: Point) -> Point {
    (pos.0 + vector.0, pos.1 + vector.1)
}

/// The cell halfway along a two-cell diagonal step, i.e. the cell a jump
/// leaps over.
pub fn midpoint(from: Point, to: Point) -> Point {
    let diff = difference(from, to);
    add(from, (diff.0 / 2, diff.1 / 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_the_64_cells() {
        let mut accepted = 0;
        for col in -2i8..10 {
            for row in -2i8..10 {
                if is_valid((col, row)) {
                    accepted += 1;
                }
            }
        }
        assert_eq!(accepted, 64);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(is_valid((0, 0)));
        assert!(is_valid((7, 7)));
        assert!(!is_valid((-1, 3)));
        assert!(!is_valid((3, -1)));
        assert!(!is_valid((8, 3)));
        assert!(!is_valid((3, 8)));
    }

    #[test]
    fn vector_arithmetic() {
        assert_eq!(difference((2, 2), (4, 4)), (2, 2));
        assert_eq!(difference((4, 4), (2, 2)), (-2, -2));
        assert_eq!(add((2, 2), (-1, 1)), (1, 3));
    }

    #[test]
    fn midpoint_of_a_jump() {
        assert_eq!(midpoint((2, 2), (4, 4)), (3, 3));
        assert_eq!(midpoint((2, 2), (0, 4)), (1, 3));
        assert_eq!(midpoint((5, 5), (3, 3)), (4, 4));
    }
}
