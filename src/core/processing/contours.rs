//! Outer-border discovery on a binary mask.
//!
//! Foreground pixels are grouped with 8-connectivity and background with
//! 4-connectivity. Everything outside the image frame is background. A
//! component is reported only when the background region surrounding it is
//! the exterior one, so components sitting inside a hole of another component
//! are dropped. Each reported border is traced from the component's first
//! pixel in raster order and stored as direction-change vertices only.
//!
//! Contours come out in ascending raster order of their first pixel. OpenCV's
//! `findContours` walks the same scan but hands its list back newest first, so
//! its index 0 is the last component reached here.
use std::collections::VecDeque;

use ndarray::Array2;

use crate::types::Region;

/// Clockwise on screen (y grows downwards): E, SE, S, SW, W, NW, N, NE.
const DIRS: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
const WEST: usize = 4;

/// Pixel coordinate on the mask, `x` is the column.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// Closed outer border of one foreground component.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Contour {
    /// Direction-change vertices in tracing order
    pub points: Vec<Point>,
}

impl Contour {
    /// Smallest upright rectangle containing every vertex.
    pub fn bounding_rect(&self) -> Region {
        if self.points.is_empty() {
            return Region::new(0, 0, 0, 0);
        }
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Region::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }
}

struct Mask<'a> {
    data: &'a Array2<u8>,
    rows: isize,
    cols: isize,
}

impl<'a> Mask<'a> {
    fn new(data: &'a Array2<u8>) -> Self {
        let (rows, cols) = data.dim();
        Self {
            data,
            rows: rows as isize,
            cols: cols as isize,
        }
    }

    #[inline]
    fn is_fg(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && x < self.cols && y < self.rows && self.data[[y as usize, x as usize]] != 0
    }
}

/// Background pixels 4-connected to the image frame.
fn exterior_background(mask: &Mask<'_>) -> Array2<bool> {
    let (rows, cols) = (mask.rows as usize, mask.cols as usize);
    let mut exterior = Array2::from_elem((rows, cols), false);
    let mut queue = VecDeque::new();

    let seed = |x: usize, y: usize, exterior: &mut Array2<bool>, queue: &mut VecDeque<_>| {
        if !mask.is_fg(x as isize, y as isize) && !exterior[[y, x]] {
            exterior[[y, x]] = true;
            queue.push_back((x, y));
        }
    };
    for x in 0..cols {
        seed(x, 0, &mut exterior, &mut queue);
        seed(x, rows - 1, &mut exterior, &mut queue);
    }
    for y in 0..rows {
        seed(0, y, &mut exterior, &mut queue);
        seed(cols - 1, y, &mut exterior, &mut queue);
    }

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in [(1isize, 0isize), (-1, 0), (0, 1), (0, -1)] {
            let (nx, ny) = (x as isize + dx, y as isize + dy);
            if nx < 0 || ny < 0 || nx >= mask.cols || ny >= mask.rows {
                continue;
            }
            let (ux, uy) = (nx as usize, ny as usize);
            if !exterior[[uy, ux]] && !mask.is_fg(nx, ny) {
                exterior[[uy, ux]] = true;
                queue.push_back((ux, uy));
            }
        }
    }
    exterior
}

/// Mark every pixel of the 8-connected component containing `start`.
fn flood_component(mask: &Mask<'_>, start: (usize, usize), visited: &mut Array2<bool>) {
    let mut queue = VecDeque::from([start]);
    visited[[start.1, start.0]] = true;
    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in DIRS {
            let (nx, ny) = (x as isize + dx, y as isize + dy);
            if mask.is_fg(nx, ny) && !visited[[ny as usize, nx as usize]] {
                visited[[ny as usize, nx as usize]] = true;
                queue.push_back((nx as usize, ny as usize));
            }
        }
    }
}

#[inline]
fn step(p: (isize, isize), dir: usize) -> (isize, isize) {
    (p.0 + DIRS[dir].0, p.1 + DIRS[dir].1)
}

#[inline]
fn direction_to(from: (isize, isize), to: (isize, isize)) -> usize {
    let delta = (to.0 - from.0, to.1 - from.1);
    DIRS.iter().position(|&d| d == delta).unwrap_or(WEST)
}

/// Follow the outer border starting at the component's first raster pixel,
/// whose west neighbour is background.
fn trace_outer_border(mask: &Mask<'_>, start: (isize, isize)) -> Vec<(isize, isize)> {
    // First foreground neighbour clockwise from the west
    let first = (1..8)
        .map(|k| step(start, (WEST + k) % 8))
        .find(|&(x, y)| mask.is_fg(x, y));
    let Some(first) = first else {
        return vec![start];
    };

    let mut border = Vec::new();
    let mut prev = first;
    let mut current = start;
    loop {
        // Counter-clockwise around `current`, starting just past `prev`
        let back = direction_to(current, prev);
        let next = (1..=8)
            .map(|k| step(current, (back + 8 - k) % 8))
            .find(|&(x, y)| mask.is_fg(x, y))
            .unwrap_or(prev);
        border.push(current);
        if next == start && current == first {
            break;
        }
        prev = current;
        current = next;
    }
    border
}

/// Keep only the vertices where the walking direction changes.
fn compress_chain(border: &[(isize, isize)]) -> Vec<(isize, isize)> {
    let n = border.len();
    if n < 3 {
        return border.to_vec();
    }
    (0..n)
        .filter(|&i| {
            let prev = border[(i + n - 1) % n];
            let here = border[i];
            let next = border[(i + 1) % n];
            (here.0 - prev.0, here.1 - prev.1) != (next.0 - here.0, next.1 - here.1)
        })
        .map(|i| border[i])
        .collect()
}

/// Outer borders of all top-level foreground components, in raster order of
/// each component's first pixel.
pub fn find_external_contours(binary: &Array2<u8>) -> Vec<Contour> {
    let mask = Mask::new(binary);
    let (rows, cols) = binary.dim();
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let exterior = exterior_background(&mask);
    let mut visited = Array2::from_elem((rows, cols), false);
    let mut contours = Vec::new();

    for y in 0..rows {
        for x in 0..cols {
            if binary[[y, x]] == 0 || visited[[y, x]] {
                continue;
            }
            flood_component(&mask, (x, y), &mut visited);

            // The west neighbour belongs to the background that encloses this
            // component; off-frame counts as exterior.
            let top_level = x == 0 || exterior[[y, x - 1]];
            if !top_level {
                continue;
            }

            let border = trace_outer_border(&mask, (x as isize, y as isize));
            let points = compress_chain(&border)
                .into_iter()
                .map(|(px, py)| Point {
                    x: px as u32,
                    y: py as u32,
                })
                .collect();
            contours.push(Contour { points });
        }
    }
    contours
}
