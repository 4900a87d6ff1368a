use crate::config::ColumnMap;
use crate::error::{GfResult, GroupForgeError};
use crate::model::MemberIdx;
use std::collections::HashMap;
use std::io::Read;

/// Placeholder substituted for empty attribute cells, so a missing
/// answer counts as its own (shared) category instead of poisoning the
/// scorer with ad-hoc empties.
pub const MISSING_VALUE: &str = "N/A";

/// One individual: an opaque id plus one interned code per attribute.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub attrs: Vec<u16>,
}

/// The population plus the interning tables built while loading it.
///
/// Attribute values are interned per attribute index; the engine only
/// ever compares codes, and the tables here turn codes back into the
/// original strings for reports and export.
#[derive(Debug)]
pub struct Roster {
    members: Vec<Member>,
    attr_names: Vec<String>,
    values: Vec<Vec<String>>,
}

impl Roster {
    /// Builds a roster from `(id, attribute tuple)` records, interning
    /// attribute values in order of first appearance.
    pub fn from_records<I>(attr_names: Vec<String>, records: I) -> GfResult<Roster>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let attr_count = attr_names.len();
        let mut interners: Vec<HashMap<String, u16>> = vec![HashMap::new(); attr_count];
        let mut values: Vec<Vec<String>> = vec![Vec::new(); attr_count];
        let mut members = Vec::new();

        for (row, (id, attrs)) in records.into_iter().enumerate() {
            if attrs.len() != attr_count {
                return Err(GroupForgeError::Validation(format!(
                    "record {} ('{}') has {} attribute values, expected {}",
                    row,
                    id,
                    attrs.len(),
                    attr_count
                )));
            }
            let mut codes = Vec::with_capacity(attr_count);
            for (k, raw) in attrs.into_iter().enumerate() {
                let value = if raw.trim().is_empty() {
                    MISSING_VALUE.to_string()
                } else {
                    raw
                };
                let next = values[k].len();
                if next > u16::MAX as usize {
                    return Err(GroupForgeError::Validation(format!(
                        "attribute '{}' has more than {} distinct values",
                        attr_names[k],
                        u16::MAX
                    )));
                }
                let code = *interners[k].entry(value.clone()).or_insert_with(|| {
                    values[k].push(value);
                    next as u16
                });
                codes.push(code);
            }
            members.push(Member { id, attrs: codes });
        }

        Ok(Roster {
            members,
            attr_names,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn attr_count(&self) -> usize {
        self.attr_names.len()
    }

    pub fn attr_names(&self) -> &[String] {
        &self.attr_names
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, idx: MemberIdx) -> &Member {
        &self.members[idx as usize]
    }

    /// Original string for an interned attribute code.
    pub fn value_name(&self, attr: usize, code: u16) -> &str {
        &self.values[attr][code as usize]
    }

    /// Per-attribute population statistics, in order of first
    /// appearance. The ideal average is computed here from the roster
    /// itself and handed to whoever reports it; nothing is tallied
    /// globally.
    pub fn stats(&self, n_groups: usize) -> Vec<AttributeStats> {
        let total = self.members.len();
        (0..self.attr_count())
            .map(|k| {
                let mut counts = vec![0usize; self.values[k].len()];
                for member in &self.members {
                    counts[member.attrs[k] as usize] += 1;
                }
                let entries = counts
                    .iter()
                    .enumerate()
                    .map(|(code, &count)| {
                        let ideal = (count as f64 / n_groups as f64 * 10.0).round() / 10.0;
                        ValueStat {
                            value: self.values[k][code].clone(),
                            count,
                            share: count as f64 / total as f64,
                            ideal_per_group: ideal.max(1.0),
                        }
                    })
                    .collect();
                AttributeStats {
                    attribute: self.attr_names[k].clone(),
                    entries,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ValueStat {
    pub value: String,
    pub count: usize,
    pub share: f64,
    pub ideal_per_group: f64,
}

#[derive(Debug, Clone)]
pub struct AttributeStats {
    pub attribute: String,
    pub entries: Vec<ValueStat>,
}

/// A roster as loaded from disk: the interned population plus the raw
/// rows it came from, so the caller can re-join full records when
/// writing results.
#[derive(Debug)]
pub struct LoadedRoster {
    pub roster: Roster,
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

fn column_index(headers: &[String], name: &str) -> GfResult<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        GroupForgeError::Validation(format!(
            "column '{}' not found; available columns: {}",
            name,
            headers.join(", ")
        ))
    })
}

/// Reads a roster from CSV. The column map names the identity columns
/// and the ordered list of attribute columns; everything else is kept
/// verbatim in the raw records.
pub fn load_csv<R: Read>(reader: R, columns: &ColumnMap) -> GfResult<LoadedRoster> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let name_idx = column_index(&headers, &columns.name_col)?;
    let attr_idx: Vec<usize> = columns
        .attr_cols
        .iter()
        .map(|c| column_index(&headers, c))
        .collect::<GfResult<_>>()?;

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        records.push(record.iter().map(|f| f.to_string()).collect::<Vec<_>>());
    }

    let roster = Roster::from_records(
        columns.attr_cols.clone(),
        records.iter().map(|row| {
            (
                row[name_idx].clone(),
                attr_idx.iter().map(|&k| row[k].clone()).collect(),
            )
        }),
    )?;

    Ok(LoadedRoster {
        roster,
        headers,
        records,
    })
}

/// Rows that exactly duplicate an earlier row (0-based record indices).
pub fn duplicate_rows(records: &[Vec<String>]) -> Vec<usize> {
    let mut seen: HashMap<&[String], usize> = HashMap::new();
    let mut dups = Vec::new();
    for (i, row) in records.iter().enumerate() {
        if seen.insert(row.as_slice(), i).is_some() {
            dups.push(i);
        }
    }
    dups
}

/// Rows whose value in one column duplicates an earlier row's.
pub fn duplicate_values(records: &[Vec<String>], column: usize) -> Vec<usize> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut dups = Vec::new();
    for (i, row) in records.iter().enumerate() {
        if seen.insert(row[column].as_str(), i).is_some() {
            dups.push(i);
        }
    }
    dups
}
