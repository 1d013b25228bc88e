//! Defects along the roll.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::RollError;

/// Number of defects per class under some stretch of the roll.
pub type DefectCounts<'a> = BTreeMap<&'a str, u32>;

/// A single defect: its position along the roll and its class label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Defect {
    pub x: f64,
    pub class: String,
}

impl Defect {
    pub fn new(x: f64, class: impl Into<String>) -> Self {
        Self {
            x,
            class: class.into(),
        }
    }
}

/// Immutable defect catalog, sorted by position.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefectMap {
    defects: Vec<Defect>,
}

impl DefectMap {
    /// Builds the map, sorting defects by position.
    pub fn new(mut defects: Vec<Defect>) -> Self {
        defects.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { defects }
    }

    /// Parses CSV text with a header naming at least an `x` and a `class`
    /// column. Other columns are ignored; blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::MissingColumn`] if the header lacks a required
    /// column and [`RollError::MalformedDefect`] for a row that cannot be
    /// read.
    pub fn from_csv_str(text: &str) -> Result<Self, RollError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let header: Vec<&str> = match lines.next() {
            Some((_, line)) => line.split(',').map(str::trim).collect(),
            None => return Err(RollError::MissingColumn { column: "x" }),
        };
        let x_col = column(&header, "x")?;
        let class_col = column(&header, "class")?;

        let mut defects = Vec::new();
        for (line_no, line) in lines {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let field = |col: usize, name: &str| {
                fields
                    .get(col)
                    .copied()
                    .ok_or_else(|| RollError::MalformedDefect {
                        line: line_no,
                        reason: format!("missing '{name}' field"),
                    })
            };

            let raw_x = field(x_col, "x")?;
            let x: f64 = raw_x.parse().map_err(|_| RollError::MalformedDefect {
                line: line_no,
                reason: format!("'{raw_x}' is not a position"),
            })?;
            if !x.is_finite() {
                return Err(RollError::MalformedDefect {
                    line: line_no,
                    reason: format!("position {raw_x} is not finite"),
                });
            }

            let class = field(class_col, "class")?;
            if class.is_empty() {
                return Err(RollError::MalformedDefect {
                    line: line_no,
                    reason: "empty defect class".into(),
                });
            }
            defects.push(Defect::new(x, class));
        }

        Ok(Self::new(defects))
    }

    /// Reads and parses a defect CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::Io`] if the file cannot be read, otherwise the
    /// errors of [`from_csv_str`](Self::from_csv_str).
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, RollError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_csv_str(&text)
    }

    /// Defects strictly between `start` and `end`.
    pub fn between(&self, start: f64, end: f64) -> &[Defect] {
        let lo = self.defects.partition_point(|d| d.x <= start);
        let hi = self.defects.partition_point(|d| d.x < end).max(lo);
        &self.defects[lo..hi]
    }

    /// Defect counts per class strictly between `start` and `end`.
    pub fn counts_between(&self, start: f64, end: f64) -> DefectCounts<'_> {
        let mut counts = DefectCounts::new();
        for defect in self.between(start, end) {
            *counts.entry(defect.class.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct defect classes.
    pub fn classes(&self) -> BTreeSet<&str> {
        self.defects.iter().map(|d| d.class.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Defect> {
        self.defects.iter()
    }

    pub fn len(&self) -> usize {
        self.defects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }
}

fn column(header: &[&str], name: &'static str) -> Result<usize, RollError> {
    header
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or(RollError::MissingColumn { column: name })
}
