use std::fmt;
use std::iter;

use console::{measure_text_width, Style};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Align {
    Left,
    Right,
}

/// Text table with a bold and underlined header row.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    header: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, header: impl Into<String>, align: Align) -> Self {
        self.header.push(header.into());
        self.align.push(align);
        self
    }

    /// Appends a row. Missing cells are left blank and surplus ones dropped.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }
        widths
    }

    fn line<'a>(&self, cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
        cells
            .chain(iter::repeat(""))
            .zip(widths.iter().zip(&self.align))
            .map(|(cell, (width, align))| {
                let padding = " ".repeat(width - measure_text_width(cell).min(*width));
                match align {
                    Align::Left => format!(" {}{} ", cell, padding),
                    Align::Right => format!(" {}{} ", padding, cell),
                }
            })
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let widths = self.widths();
        let header = self.line(self.header.iter().map(String::as_str), &widths);
        writeln!(f, "  {}", Style::new().bold().underlined().apply_to(header))?;
        for row in &self.rows {
            writeln!(f, "  {}", self.line(row.iter().map(String::as_str), &widths))?;
        }
        Ok(())
    }
}
