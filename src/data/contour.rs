//! Contour lines of a sampled scalar field (marching squares).
//!
//! Segments are keyed by the grid edge they cross, so neighbouring cells
//! share the exact same end point and can be stitched into polylines.

use std::collections::HashMap;

use eframe::egui::Color32;

/// Scalar field sampled on a rectilinear grid, row-major in `y`.
#[derive(Clone, Debug)]
pub struct Grid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    z: Vec<f64>,
}

impl Grid {
    pub fn sample(xs: Vec<f64>, ys: Vec<f64>, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut z = Vec::with_capacity(xs.len() * ys.len());
        for &y in &ys {
            for &x in &xs {
                z.push(f(x, y));
            }
        }
        Self { xs, ys, z }
    }

    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.z[j * self.xs.len() + i]
    }

    /// Finite `(min, max)` of the field.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        let mut it = self.z.iter().copied().filter(|v| v.is_finite());
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// `count` evenly spaced levels strictly inside `(lo, hi)`.
pub fn linear_levels(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let step = (hi - lo) / (count + 1) as f64;
    (1..=count).map(|k| lo + step * k as f64).collect()
}

#[derive(Clone, Debug)]
pub struct ContourLine {
    pub level: f64,
    pub points: Vec<[f64; 2]>,
    /// First and last point coincide.
    pub closed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Edge {
    /// Between `(i, j)` and `(i + 1, j)`.
    H(usize, usize),
    /// Between `(i, j)` and `(i, j + 1)`.
    V(usize, usize),
}

fn edge_point(grid: &Grid, edge: Edge, level: f64) -> [f64; 2] {
    let ((i0, j0), (i1, j1)) = match edge {
        Edge::H(i, j) => ((i, j), (i + 1, j)),
        Edge::V(i, j) => ((i, j), (i, j + 1)),
    };
    let (za, zb) = (grid.at(i0, j0), grid.at(i1, j1));
    let t = (level - za) / (zb - za);
    let (xa, ya) = (grid.xs[i0], grid.ys[j0]);
    let (xb, yb) = (grid.xs[i1], grid.ys[j1]);
    [xa + t * (xb - xa), ya + t * (yb - ya)]
}

/// Segments crossing one cell, as pairs of cell-edge indices:
/// 0 bottom, 1 right, 2 top, 3 left.
fn cell_segments(case: u8, center_above: bool) -> &'static [(u8, u8)] {
    match case {
        1 | 14 => &[(3, 0)],
        2 | 13 => &[(0, 1)],
        3 | 12 => &[(3, 1)],
        4 | 11 => &[(1, 2)],
        6 | 9 => &[(0, 2)],
        7 | 8 => &[(3, 2)],
        5 if center_above => &[(0, 1), (2, 3)],
        5 => &[(3, 0), (1, 2)],
        10 if center_above => &[(3, 0), (1, 2)],
        10 => &[(0, 1), (2, 3)],
        _ => &[],
    }
}

/// All contour polylines of `grid` at `level`.
pub fn contour_level(grid: &Grid, level: f64) -> Vec<ContourLine> {
    let (nx, ny) = (grid.xs.len(), grid.ys.len());
    if nx < 2 || ny < 2 {
        return Vec::new();
    }

    let mut segments: Vec<(Edge, Edge)> = Vec::new();
    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            let z = [
                grid.at(i, j),
                grid.at(i + 1, j),
                grid.at(i + 1, j + 1),
                grid.at(i, j + 1),
            ];
            if z.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let case = z
                .iter()
                .enumerate()
                .fold(0u8, |c, (k, &v)| if v >= level { c | (1 << k) } else { c });
            if case == 0 || case == 15 {
                continue;
            }
            let center_above = z.iter().sum::<f64>() / 4.0 >= level;
            let edges = [Edge::H(i, j), Edge::V(i + 1, j), Edge::H(i, j + 1), Edge::V(i, j)];
            for &(a, b) in cell_segments(case, center_above) {
                segments.push((edges[a as usize], edges[b as usize]));
            }
        }
    }

    let mut by_edge: HashMap<Edge, Vec<usize>> = HashMap::with_capacity(segments.len() * 2);
    for (k, (a, b)) in segments.iter().enumerate() {
        by_edge.entry(*a).or_default().push(k);
        by_edge.entry(*b).or_default().push(k);
    }

    let mut used = vec![false; segments.len()];
    let mut lines = Vec::new();
    for start in 0..segments.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let (head, tail) = segments[start];

        let mut forward = vec![head, tail];
        let mut closed = false;
        let mut cur = tail;
        while let Some(next) = take_next(&by_edge, &segments, &mut used, cur) {
            if next == head {
                closed = true;
                forward.push(head);
                break;
            }
            forward.push(next);
            cur = next;
        }

        let mut backward = Vec::new();
        if !closed {
            let mut cur = head;
            while let Some(next) = take_next(&by_edge, &segments, &mut used, cur) {
                backward.push(next);
                cur = next;
            }
        }

        let points = backward
            .iter()
            .rev()
            .chain(forward.iter())
            .map(|&e| edge_point(grid, e, level))
            .collect();
        lines.push(ContourLine {
            level,
            points,
            closed,
        });
    }
    lines
}

/// Follow an unused segment touching `edge`; returns its other end.
fn take_next(
    by_edge: &HashMap<Edge, Vec<usize>>,
    segments: &[(Edge, Edge)],
    used: &mut [bool],
    edge: Edge,
) -> Option<Edge> {
    let k = *by_edge.get(&edge)?.iter().find(|&&k| !used[k])?;
    used[k] = true;
    let (a, b) = segments[k];
    Some(if a == edge { b } else { a })
}

/// Contours for every level, in level order.
pub fn contour_map(grid: &Grid, levels: &[f64]) -> Vec<ContourLine> {
    levels
        .iter()
        .flat_map(|&l| contour_level(grid, l))
        .collect()
}

/// The "jet" colormap: blue → cyan → yellow → red for `t ∈ [0, 1]`.
pub fn jet(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |offset: f64| ((1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0) * 255.0) as u8;
    Color32::from_rgb(channel(3.0), channel(2.0), channel(1.0))
}
