//! Rasterizes drawing calls onto a character grid.
//!
//! One column is `cell_size` pixels wide and one row is twice as tall, which
//! keeps circles roughly round in a terminal.

use std::f64::consts::TAU;

use crate::display_width::{char_width, display_width};
use crate::geometry::Point;
use crate::surface::Surface;

const CIRCLE_CHAR: char = 'o';
const ARROW_CHAR: char = '*';
/// Upper bound on samples per primitive, so a huge radius cannot stall a redraw.
const MAX_SAMPLES: f64 = 20_000.0;
/// Upper bound on rows and on columns; larger surfaces are cropped.
const MAX_GRID_SIDE: f64 = 2_000.0;

struct Grid {
    cells: Vec<Vec<char>>,
    columns: usize,
    rows: usize,
}

impl Grid {
    fn new(columns: usize, rows: usize) -> Self {
        Self {
            cells: vec![vec![' '; columns]; rows],
            columns,
            rows,
        }
    }

    fn set(&mut self, row: i64, col: i64, ch: char) {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return;
        };
        if row < self.rows && col < self.columns {
            if self.cells[row][col] == '\0' && col > 0 && self.cells[row][col - 1] != '\0' {
                self.cells[row][col - 1] = ' ';
            }
            self.cells[row][col] = ch;
        }
    }

    fn write_str(&mut self, row: i64, col: i64, s: &str) {
        let mut offset = 0;
        for ch in s.chars() {
            let start = col.saturating_add(offset);
            self.set(row, start, ch);
            let w = char_width(ch) as i64;
            for j in 1..w {
                self.set(row, start.saturating_add(j), '\0');
            }
            offset += w;
        }
    }

    fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                let line: String = row.iter().filter(|&&ch| ch != '\0').collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct GridSurface {
    width: f64,
    height: f64,
    cell_size: f64,
    grid: Grid,
    scales: Vec<f64>,
}

impl GridSurface {
    pub fn new(width: f64, height: f64, cell_size: f64) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { 1.0 };
        Self {
            width,
            height,
            cell_size,
            grid: Self::empty_grid(width, height, cell_size),
            scales: Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        self.grid.render()
    }

    fn empty_grid(width: f64, height: f64, cell_size: f64) -> Grid {
        let columns = (width.max(0.0) / cell_size).ceil().min(MAX_GRID_SIDE) as usize;
        let rows = (height.max(0.0) / (2.0 * cell_size)).ceil().min(MAX_GRID_SIDE) as usize;
        Grid::new(columns, rows)
    }

    fn scale(&self) -> f64 {
        self.scales.iter().product()
    }

    fn row_height(&self) -> f64 {
        2.0 * self.cell_size
    }

    /// Maps a model point to surface pixels.
    fn to_pixels(&self, p: Point) -> Point {
        p.scale(self.scale())
    }

    fn cell_of(&self, pixels: Point) -> (i64, i64) {
        (
            (pixels.y() / self.row_height()).floor() as i64,
            (pixels.x() / self.cell_size).floor() as i64,
        )
    }

    fn cell_center(&self, row: i64, col: i64) -> Point {
        Point::new(
            (col as f64 + 0.5) * self.cell_size,
            (row as f64 + 0.5) * self.row_height(),
        )
    }

    fn plot(&mut self, pixels: Point, ch: char) {
        if pixels.is_finite() {
            let (row, col) = self.cell_of(pixels);
            self.grid.set(row, col, ch);
        }
    }

    /// Cells overlapping the pixel box, clipped to the grid.
    fn cells_in_box(&self, min: Point, max: Point) -> Vec<(i64, i64)> {
        if !(min.is_finite() && max.is_finite()) {
            return Vec::new();
        }
        let (top, left) = self.cell_of(min);
        let (bottom, right) = self.cell_of(max);
        let top = top.max(0);
        let left = left.max(0);
        let bottom = bottom.min(self.grid.rows as i64 - 1);
        let right = right.min(self.grid.columns as i64 - 1);
        (top..=bottom)
            .flat_map(|row| (left..=right).map(move |col| (row, col)))
            .collect()
    }
}

impl Surface for GridSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.grid = Self::empty_grid(width, height, self.cell_size);
    }

    fn clear(&mut self) {
        self.grid = Self::empty_grid(self.width, self.height, self.cell_size);
    }

    fn stroke_circle(&mut self, center: Point, radius: f64) {
        if radius <= 0.0 {
            return;
        }
        let pixel_radius = radius * self.scale();
        let samples = (TAU * pixel_radius / self.cell_size * 2.0).ceil().clamp(16.0, MAX_SAMPLES) as usize;
        for i in 0..samples {
            let angle = TAU * i as f64 / samples as f64;
            let p = self.to_pixels(Point::on_circle(center, radius, angle));
            self.plot(p, CIRCLE_CHAR);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64) {
        if radius <= 0.0 {
            return;
        }
        let c = self.to_pixels(center);
        let r = radius * self.scale();
        let corner = Point::new(r, r);
        for (row, col) in self.cells_in_box(c.sub_point(corner), c.add_point(corner)) {
            if self.cell_center(row, col).distance_squared(c) <= r * r {
                self.grid.set(row, col, ' ');
            }
        }
    }

    fn draw_centered_text(&mut self, position: Point, text: &str) {
        let p = self.to_pixels(position);
        if !p.is_finite() {
            return;
        }
        let (row, col) = self.cell_of(p);
        let half = (display_width(text) / 2) as i64;
        self.grid.write_str(row, col.saturating_sub(half), text);
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        let a = self.to_pixels(from);
        let b = self.to_pixels(to);
        if !(a.is_finite() && b.is_finite()) {
            return;
        }
        let dx = (b.x() - a.x()) / self.cell_size;
        let dy = (b.y() - a.y()) / self.row_height();
        let ch = if dy.abs() < 0.5 * dx.abs() {
            '-'
        } else if dx.abs() < 0.5 * dy.abs() {
            '|'
        } else if dx * dy > 0.0 {
            '\\'
        } else {
            '/'
        };
        let steps = (dx.abs().max(dy.abs()) * 2.0).ceil().clamp(1.0, MAX_SAMPLES) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let p = a.add_point(b.sub_point(a).scale(t));
            self.plot(p, ch);
        }
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point) {
        let [a, b, c] = [a, b, c].map(|p| self.to_pixels(p));
        let min = Point::new(a.x().min(b.x()).min(c.x()), a.y().min(b.y()).min(c.y()));
        let max = Point::new(a.x().max(b.x()).max(c.x()), a.y().max(b.y()).max(c.y()));
        let mut filled = false;
        for (row, col) in self.cells_in_box(min, max) {
            if triangle_contains([a, b, c], self.cell_center(row, col)) {
                self.grid.set(row, col, ARROW_CHAR);
                filled = true;
            }
        }
        // Arrowheads are usually smaller than a cell; keep at least the tip.
        if !filled {
            self.plot(a, ARROW_CHAR);
        }
    }

    fn with_scale(&mut self, factor: f64, draw: &mut dyn FnMut(&mut dyn Surface)) {
        self.scales.push(factor);
        draw(self);
        self.scales.pop();
    }
}

fn triangle_contains([a, b, c]: [Point; 3], p: Point) -> bool {
    let cross = |o: Point, u: Point, v: Point| {
        (u.x() - o.x()) * (v.y() - o.y()) - (u.y() - o.y()) * (v.x() - o.x())
    };
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_negative && has_positive)
}
