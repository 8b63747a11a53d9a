// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;
    fn padding_direction(&self) -> PaddingDirection;

    fn get_color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

pub trait TableStyle {
    fn write_table<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result;
}

pub struct Table<'a, S: TableStyle, T, C: TableColumn<T>> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S: TableStyle, T, C: TableColumn<T>> Table<'a, S, T, C> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S: TableStyle, T, C: TableColumn<T>> fmt::Display for Table<'_, S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.style.write_table(f, self.columns, self.data)
    }
}

/// Plain aligned columns, one row per line.
#[derive(Debug, Clone)]
pub struct TableStyleBasic {
    separator: &'static str,
    padding: bool,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self {
            separator: " ",
            padding: true,
        }
    }
}

impl TableStyle for TableStyleBasic {
    fn write_table<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let table: Vec<Vec<Cow<'_, str>>> = data
            .iter()
            .map(|row| columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let max_width = self.padding.then(|| get_column_max_width(&table, columns.len()));

        for (cells, row) in table.iter().zip(data) {
            for (j, (col, cell)) in columns.iter().zip(cells).enumerate() {
                let last = j == columns.len() - 1;
                let cell = match (&max_width, col.padding_direction()) {
                    // last column does not need padding if it's left-aligned
                    (Some(_), PaddingDirection::Left) if last => cell.to_string(),
                    (Some(w), PaddingDirection::Left) => pad(cell, w[j], true),
                    (Some(w), PaddingDirection::Right) => pad(cell, w[j], false),
                    (None, _) => cell.to_string(),
                };

                match col.get_color(row) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }

                if last {
                    writeln!(f)?;
                } else {
                    write!(f, "{}", self.separator)?;
                }
            }
        }
        Ok(())
    }
}

/// A JSON array with one object per row, keyed by column name.
#[derive(Debug, Clone)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn write_table<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = data
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| {
                        let value = serde_json::Value::String(col.format(row).into_owned());
                        (col.name().into_owned(), value)
                    })
                    .collect()
            })
            .collect();

        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}

// width aware padding, `format!("{:<w$}")` counts chars rather than columns
fn pad(cell: &str, width: usize, left_aligned: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    if left_aligned {
        format!("{cell}{fill}")
    } else {
        format!("{fill}{cell}")
    }
}

fn get_column_max_width(table: &[Vec<Cow<'_, str>>], n: usize) -> Vec<usize> {
    let mut max_width = vec![0; n];
    for row in table {
        for (i, cell) in row.iter().enumerate() {
            max_width[i] = max_width[i].max(cell.width());
        }
    }
    max_width
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Col(usize, PaddingDirection);

    impl TableColumn<Vec<&'static str>> for Col {
        fn name(&self) -> Cow<'_, str> {
            format!("c{}", self.0).into()
        }

        fn format<'a>(&self, data: &'a Vec<&'static str>) -> Cow<'a, str> {
            data[self.0].into()
        }

        fn padding_direction(&self) -> PaddingDirection {
            self.1
        }
    }

    #[test]
    fn basic_pads_columns() {
        let columns = vec![
            Col(0, PaddingDirection::Right),
            Col(1, PaddingDirection::Left),
            Col(2, PaddingDirection::Left),
        ];
        let data = vec![vec!["1", "2023-1-05", "Dentist"], vec!["12", "会议", "Lunch"]];
        let out = Table::new(TableStyleBasic::new(), &columns, &data).to_string();
        assert_eq!(out, " 1 2023-1-05 Dentist\n12 会议      Lunch\n");
    }

    #[test]
    fn json_keys_by_column_name() {
        let columns = vec![Col(0, PaddingDirection::Left), Col(1, PaddingDirection::Left)];
        let data = vec![vec!["a", "b"]];
        let out = Table::new(TableStyleJson::new(), &columns, &data).to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!([{ "c0": "a", "c1": "b" }]));
    }

    #[test]
    fn empty_table_renders_nothing() {
        let columns = vec![Col(0, PaddingDirection::Left)];
        let data: Vec<Vec<&'static str>> = Vec::new();
        assert_eq!(
            Table::new(TableStyleBasic::new(), &columns, &data).to_string(),
            ""
        );
    }
}
