// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A column of a [`Table`] showing rows of type `T`.
pub trait Column<T> {
    fn name(&self) -> &'static str;
    fn format(&self, data: &T) -> String;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// Rows rendered with aligned columns and a bold header.
#[derive(Debug)]
pub struct Table<'a, T, C: Column<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'static str,
}

impl<'a, T, C: Column<T>> Table<'a, T, C> {
    pub const fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
        }
    }
}

impl<T, C: Column<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = self.columns.iter().map(|c| c.name().to_string()).collect();
        let rows: Vec<Vec<String>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|c| c.format(row)).collect())
            .collect();
        let widths = column_widths(&header, &rows);
        let last = self.columns.len().saturating_sub(1);

        for (i, (name, width)) in header.iter().zip(&widths).enumerate() {
            let cell = pad(name, *width, PaddingDirection::Left, i == last);
            write!(f, "{}", cell.bold())?;
            if i < last {
                write!(f, "{}", self.separator)?;
            }
        }
        writeln!(f)?;

        for (cells, row) in rows.into_iter().zip(self.data) {
            for (i, ((col, cell), width)) in self.columns.iter().zip(cells).zip(&widths).enumerate() {
                let cell = pad(&cell, *width, col.padding_direction(), i == last);
                match col.color(row) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                if i < last {
                    write!(f, "{}", self.separator)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Pads by display width so wide characters line up; the last
/// left-aligned column is left ragged.
fn pad(cell: &str, width: usize, direction: PaddingDirection, last: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        PaddingDirection::Left if last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{fill}"),
        PaddingDirection::Right => format!("{fill}{cell}"),
    }
}

fn column_widths(header: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }
    widths
}
