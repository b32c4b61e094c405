use gridstar_core::Location;

/// Manhattan (L1) distance between two locations.
#[inline]
pub fn manhattan(a: Location, b: Location) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric_sum_of_axis_deltas() {
        let a = Location::new(1, 5);
        let b = Location::new(4, 1);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(manhattan(b, a), 7);
        assert_eq!(manhattan(a, a), 0);
    }
}
