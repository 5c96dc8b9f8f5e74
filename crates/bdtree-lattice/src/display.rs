//! ASCII rendering of the populated lattice.
//!
//! Formatting only: the renderer reads node snapshots and never mutates
//! the lattice. Rendering is an explicit call against a lattice handle,
//! separate from pricing.

use std::fmt::Write;

use crate::lattice::RateLattice;

/// Lines of text per node block (value, coupon, rate).
const BLOCK_LINES: usize = 3;

/// Renders the lattice as a triangular diagram.
///
/// Each node prints as a three-line block with its value (`-` when not yet
/// computed), coupon, and short rate in percent, value and coupon rounded
/// to 3 decimal places and the rate to 5. Columns run left to right in
/// time; within a column, state 0 sits at the top.
///
/// # Example
///
/// ```rust
/// use bdtree_lattice::{display, RateLattice};
///
/// let mut lattice = RateLattice::new(1);
/// lattice.set_rate(0, 0, 0.035).unwrap();
///
/// let diagram = display::render(&lattice);
/// assert!(diagram.contains("R: 3.50000%"));
/// assert!(diagram.contains("V: -"));
/// ```
#[must_use]
pub fn render(lattice: &RateLattice) -> String {
    let cols = lattice.steps() + 1;
    let rows = 2 * cols - 1;

    // Lay node blocks onto a diamond grid: node (i, j) sits at
    // grid row (steps - j) + 2i, grid column j.
    let mut grid: Vec<Vec<Option<[String; BLOCK_LINES]>>> = vec![vec![None; cols]; rows];
    let mut width = 0;

    for (j, column) in lattice.columns().enumerate() {
        for (i, node) in column.iter().enumerate() {
            let value = match node.value {
                Some(v) => format!("V: {:.3}", v),
                None => "V: -".to_string(),
            };
            let coupon = format!("C: {:.3}", node.coupon);
            let rate = format!("R: {:.5}%", node.rate * 100.0);

            width = width
                .max(value.len())
                .max(coupon.len())
                .max(rate.len());

            grid[lattice.steps() - j + 2 * i][j] = Some([value, coupon, rate]);
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", "- ".repeat(cols * (width + 2) / 2));

    for row in &grid {
        for line in 0..BLOCK_LINES {
            let mut text_line = String::new();
            for cell in row {
                match cell {
                    Some(block) => {
                        let _ = write!(text_line, "{:<w$}  ", block[line], w = width);
                    }
                    None => {
                        let _ = write!(text_line, "{:<w$}  ", "", w = width);
                    }
                }
            }
            let _ = writeln!(out, "{}", text_line.trim_end());
        }
    }

    out
}
