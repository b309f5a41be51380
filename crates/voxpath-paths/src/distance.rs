use voxpath_core::Point3;

/// Cost of one orthogonal step (horizontal or vertical).
pub const ORTHOGONAL_COST: i32 = 10;

/// Cost of one horizontal diagonal step, ≈ 10·√2.
pub const DIAGONAL_COST: i32 = 14;

/// Octile distance on the horizontal plane plus orthogonal vertical cost.
///
/// With `lo ≤ hi` the sorted horizontal deltas and `dy` the vertical delta:
/// `14·lo + 10·(hi − lo) + 10·dy`.
#[inline]
pub fn octile(a: Point3, b: Point3) -> i32 {
    let d = (a - b).abs();
    let (lo, hi) = if d.x <= d.z { (d.x, d.z) } else { (d.z, d.x) };
    DIAGONAL_COST * lo + ORTHOGONAL_COST * (hi - lo) + ORTHOGONAL_COST * d.y
}

/// Sum of the octile costs of the steps `from → path[0] → path[1] → …`.
pub fn path_cost(from: Point3, path: &[Point3]) -> i32 {
    let mut prev = from;
    let mut total = 0;
    for &p in path {
        total += octile(prev, p);
        prev = p;
    }
    total
}
