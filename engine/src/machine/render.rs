//! Textual board rendering
//!
//! Debugging aid consuming only the machine's read accessors. Each row's
//! occupied peg position prints as `1`, every other on-row position as `0`,
//! indented into the triangle shape; the slot-count line is attached at the
//! bottom:
//!
//! ```text
//!        0
//!      1   0
//!    0   0   0
//!  0   0   1   0
//!    2   0   1   4
//! ```

use std::fmt;

use super::engine::BeanMachine;

/// Spaces between numbers when printing the machine state. Keep odd (even
/// values misalign the triangle).
const XSPACING: usize = 3;

impl BeanMachine {
    /// Indentation for the first column of row `y`
    fn indent(&self, y: usize) -> usize {
        let root_indent = (self.slot_count() - 1) * (XSPACING + 1) / 2 + (XSPACING + 1);
        root_indent - (XSPACING + 1) / 2 * y
    }

    /// Bean counts of all slots on one line, column-aligned with the board
    ///
    /// # Example
    /// ```
    /// use bean_machine_core_rs::BeanMachine;
    ///
    /// let machine = BeanMachine::new(3);
    /// assert_eq!(machine.slot_string(), "   0   0   0");
    /// ```
    pub fn slot_string(&self) -> String {
        let mut line = String::new();
        for i in 0..self.slot_count() {
            line.push_str(&format!(
                "{:>width$}",
                self.slot_bean_count(i),
                width = XSPACING + 1
            ));
        }
        line
    }
}

impl fmt::Display for BeanMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.slot_count() {
            let bean_x = self.in_flight_x(y);
            for x in 0..=y {
                let spacing = if x == 0 { self.indent(y) } else { XSPACING + 1 };
                let cell = if Some(x) == bean_x { 1 } else { 0 };
                write!(f, "{:>width$}", cell, width = spacing)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", self.slot_string())
    }
}
