use sciplot_demos::data::contour::{contour_level, contour_map, jet, linear_levels, Grid};
use sciplot_demos::data::samples::linspace;

fn radial_grid(n: usize) -> Grid {
    let axis = linspace(-2.0, 2.0, n);
    Grid::sample(axis.clone(), axis, |x, y| x.hypot(y))
}

#[test]
fn radial_field_gives_closed_circles() {
    let grid = radial_grid(81);
    for r in [0.5, 1.0, 1.5] {
        let lines = contour_level(&grid, r);
        assert_eq!(lines.len(), 1, "level {r}");
        let line = &lines[0];
        assert!(line.closed);
        assert_eq!(line.points.first(), line.points.last());
        for p in &line.points {
            let d = p[0].hypot(p[1]);
            assert!((d - r).abs() < 0.01, "point at radius {d} on level {r}");
        }
    }
}

#[test]
fn level_touching_the_border_stays_open() {
    // radius 2.5 leaves the square through all four sides
    let grid = radial_grid(41);
    let lines = contour_level(&grid, 2.5);
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| !l.closed && l.points.len() > 2));
}

#[test]
fn levels_outside_the_field_yield_nothing() {
    let grid = radial_grid(21);
    assert!(contour_level(&grid, -1.0).is_empty());
    assert!(contour_level(&grid, 10.0).is_empty());
}

#[test]
fn map_keeps_level_order() {
    let grid = radial_grid(41);
    let (lo, hi) = grid.z_range().unwrap();
    assert!(lo.abs() < 1e-12);
    let levels = linear_levels(lo, hi, 5);
    assert_eq!(levels.len(), 5);
    assert!(levels.iter().all(|&l| l > lo && l < hi));
    let lines = contour_map(&grid, &levels);
    assert!(lines.windows(2).all(|w| w[0].level <= w[1].level));
}

#[test]
fn jet_passes_through_green() {
    let mid = jet(0.5);
    assert!(mid.g() > 200);
    assert!(mid.r() < 200 && mid.b() < 200);
}
