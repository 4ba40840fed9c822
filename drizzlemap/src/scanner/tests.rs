use glam::DVec2;

use super::*;
use crate::constants::MAX_INV_ERR;

fn v(x: f64, y: f64) -> Vertex {
    DVec2::new(x, y)
}

fn square_scanner(min: Vertex, max: Vertex, bounds: Aabb) -> Scanner {
    Scanner::new(&Polygon::rectangle(min, max), bounds, MAX_INV_ERR).unwrap()
}

fn octagon() -> Polygon {
    Polygon::from_vertices(&[
        v(3.5, 0.0),
        v(6.5, 0.0),
        v(10.0, 3.5),
        v(10.0, 6.5),
        v(6.5, 10.0),
        v(3.5, 10.0),
        v(0.0, 6.5),
        v(0.0, 3.5),
    ])
    .unwrap()
}

// ============================================================================
// Edges
// ============================================================================

#[test]
fn test_vertical_edges() {
    let left = Edge::new(v(5.0, 5.0), v(5.0, 10.0), Side::Left);
    assert_eq!(left.m, 0.0);
    assert_eq!(left.b, 5.0);
    assert_eq!(left.c, 5.5);

    let right = Edge::new(v(10.0, 5.0), v(10.0, 10.0), Side::Right);
    assert_eq!(right.b, 10.0);
    assert_eq!(right.c, 9.5);
}

#[test]
fn test_slanted_edge() {
    let edge = Edge::new(v(0.0, 0.0), v(4.0, 8.0), Side::Left);
    assert!((edge.m - 0.5).abs() < 1e-15);
    assert!(edge.b.abs() < 1e-15);
    assert!((edge.c - 0.75).abs() < 1e-15);
    assert!((edge.x_at(2) - 1.75).abs() < 1e-15);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_square_chains() {
    let scanner = square_scanner(v(5.0, 5.0), v(10.0, 10.0), Aabb::new(0, 15, 0, 15));
    assert_eq!(scanner.state(), ScanState::Active);
    assert_eq!(scanner.min_y(), 5.0);
    assert_eq!(scanner.max_y(), 10.0);

    assert_eq!(scanner.left_edges().len(), 1);
    assert_eq!(scanner.right_edges().len(), 1);
    assert_eq!(scanner.left_edges()[0].v1, v(5.0, 5.0));
    assert_eq!(scanner.left_edges()[0].v2, v(5.0, 10.0));
    assert_eq!(scanner.right_edges()[0].v1, v(10.0, 5.0));
    assert_eq!(scanner.right_edges()[0].v2, v(10.0, 10.0));
}

#[test]
fn test_octagon_chains() {
    let scanner = Scanner::new(&octagon(), Aabb::new(0, 15, 0, 15), MAX_INV_ERR).unwrap();

    let left: Vec<_> = scanner.left_edges().iter().map(|e| (e.v1, e.v2)).collect();
    assert_eq!(
        left,
        vec![
            (v(3.5, 0.0), v(0.0, 3.5)),
            (v(0.0, 3.5), v(0.0, 6.5)),
            (v(0.0, 6.5), v(3.5, 10.0)),
        ]
    );

    let right: Vec<_> = scanner.right_edges().iter().map(|e| (e.v1, e.v2)).collect();
    assert_eq!(
        right,
        vec![
            (v(6.5, 0.0), v(10.0, 3.5)),
            (v(10.0, 3.5), v(10.0, 6.5)),
            (v(10.0, 6.5), v(6.5, 10.0)),
        ]
    );
    assert!(scanner.left_edges().iter().all(|e| e.side == Side::Left));
}

#[test]
fn test_triangle_single_apex() {
    let triangle = Polygon::from_vertices(&[v(0.0, 0.0), v(10.0, 0.0), v(5.0, 8.0)]).unwrap();
    let scanner = Scanner::new(&triangle, Aabb::new(0, 15, 0, 15), MAX_INV_ERR).unwrap();

    assert_eq!(scanner.left_edges().len(), 1);
    assert_eq!(scanner.right_edges().len(), 1);
    assert_eq!(scanner.left_edges()[0].v2, v(5.0, 8.0));
    assert_eq!(scanner.right_edges()[0].v2, v(5.0, 8.0));
}

#[test]
fn test_degenerate_polygon_rejected() {
    let segment = Polygon::from_vertices(&[v(0.0, 0.0), v(3.0, 3.0)]).unwrap();
    assert_eq!(
        Scanner::new(&segment, Aabb::new(0, 4, 0, 4), MAX_INV_ERR).unwrap_err(),
        PolygonError::Degenerate { vertices: 2 }
    );
}

// ============================================================================
// Row queries
// ============================================================================

#[test]
fn test_square_rows() {
    let mut scanner = square_scanner(v(5.0, 5.0), v(10.0, 10.0), Aabb::new(0, 15, 0, 15));

    assert_eq!(scanner.scanline_limits(5), Ok((5, 10)));
    assert_eq!(scanner.scanline_limits(6), Ok((5, 10)));
    assert_eq!(scanner.scanline_limits(10), Ok((5, 10)));
    assert_eq!(scanner.scanline_limits(11), Err(ScanError::EndOfScan));
    assert_eq!(scanner.state(), ScanState::Exhausted);
}

#[test]
fn test_end_of_scan_is_sticky() {
    let mut scanner = square_scanner(v(5.0, 5.0), v(10.0, 10.0), Aabb::new(0, 15, 0, 15));
    assert_eq!(scanner.scanline_limits(11), Err(ScanError::EndOfScan));

    // Exhaustion wins over every other outcome.
    for y in [12, 16, 100] {
        assert_eq!(scanner.scanline_limits(y), Err(ScanError::EndOfScan));
    }
}

#[test]
fn test_out_of_bounds_rows() {
    let mut scanner = square_scanner(v(5.0, 5.0), v(10.0, 10.0), Aabb::new(0, 15, 0, 15));

    // Below the polygon.
    assert_eq!(scanner.scanline_limits(4), Err(ScanError::OutOfBounds));
    // Past the valid rows.
    assert_eq!(scanner.scanline_limits(16), Err(ScanError::OutOfBounds));
    assert_eq!(scanner.state(), ScanState::Active);

    // Rejected rows leave the cursors untouched.
    assert_eq!(scanner.scanline_limits(5), Ok((5, 10)));
}

#[test]
fn test_rows_below_valid_bounds() {
    let mut scanner = square_scanner(v(0.0, 0.0), v(10.0, 10.0), Aabb::new(0, 15, 3, 15));
    assert_eq!(scanner.scanline_limits(2), Err(ScanError::OutOfBounds));
    assert_eq!(scanner.scanline_limits(3), Ok((0, 10)));
}

#[test]
fn test_columns_clamped_to_bounds() {
    let mut scanner = square_scanner(v(5.0, 5.0), v(10.0, 10.0), Aabb::new(0, 8, 0, 15));
    assert_eq!(scanner.scanline_limits(6), Ok((5, 8)));
}

#[test]
fn test_zero_width_row() {
    // Entirely left of the valid columns.
    let mut scanner = square_scanner(v(-10.0, 5.0), v(-5.0, 10.0), Aabb::new(0, 15, 0, 15));
    assert_eq!(scanner.scanline_limits(6), Err(ScanError::ZeroWidth));
}

#[test]
fn test_octagon_rows() {
    let mut scanner = Scanner::new(&octagon(), Aabb::new(0, 15, 0, 15), MAX_INV_ERR).unwrap();

    let expected = [
        (4, 6),
        (3, 7),
        (2, 8),
        (1, 9),
        (0, 10),
        (0, 10),
        (0, 10),
        (1, 9),
        (2, 8),
        (3, 7),
        (4, 6),
    ];
    for (y, &limits) in expected.iter().enumerate() {
        assert_eq!(
            scanner.scanline_limits(y as isize),
            Ok(limits),
            "row {}",
            y
        );
    }
    assert_eq!(scanner.scanline_limits(11), Err(ScanError::EndOfScan));
}

#[test]
fn test_triangle_rows_narrow_to_apex() {
    let triangle = Polygon::from_vertices(&[v(0.0, 0.0), v(10.0, 0.0), v(5.0, 8.0)]).unwrap();
    let mut scanner = Scanner::new(&triangle, Aabb::new(0, 15, 0, 15), MAX_INV_ERR).unwrap();

    assert_eq!(scanner.scanline_limits(0), Ok((1, 9)));
    assert_eq!(scanner.scanline_limits(3), Ok((3, 7)));
    assert_eq!(scanner.scanline_limits(6), Ok((5, 5)));
    assert_eq!(scanner.scanline_limits(7), Err(ScanError::ZeroWidth));
    assert_eq!(scanner.scanline_limits(9), Err(ScanError::EndOfScan));
}

#[test]
fn test_exhausted_scanner() {
    let mut scanner = Scanner::exhausted(Aabb::new(0, 3, 0, 3));
    assert_eq!(scanner.state(), ScanState::Exhausted);
    assert!(scanner.left_edges().is_empty());
    assert_eq!(scanner.scanline_limits(0), Err(ScanError::EndOfScan));
}
