use super::readers::open_table_reader;
use crate::{
    constants::VARIANT_GROUP,
    core::variant::{Column, VariantRecord, VariantTable},
    error::SvevalError,
    utils::util::{format_number_with_commas, is_missing, Result},
};
use csv::StringRecord;
use std::{collections::BTreeMap, io::Read, path::Path};

/// Number of header rows preceding the data: group labels, then column names.
const HEADER_ROWS: usize = 2;

/// Positions of the known columns within the `VARIANT` group.
#[derive(Debug)]
struct GroupLayout {
    positions: BTreeMap<Column, usize>,
}

impl GroupLayout {
    fn resolve(groups: &StringRecord, names: &StringRecord, path: &Path) -> Result<Self> {
        let mut positions = BTreeMap::new();
        let mut group_width = 0;
        let mut current_group = "";
        for (i, (group, name)) in groups.iter().zip(names.iter()).enumerate() {
            let group = group.trim();
            // Dataframe writers leave the label blank (or "Unnamed: ...") on all
            // but the first column of a group.
            if !group.is_empty() && !group.starts_with("Unnamed:") {
                current_group = group;
            }
            if current_group != VARIANT_GROUP {
                continue;
            }
            group_width += 1;
            if let Some(column) = Column::from_name(name.trim()) {
                positions.entry(column).or_insert(i);
            }
        }

        if group_width == 0 {
            return Err(SvevalError::MissingGroup {
                path: path.to_path_buf(),
                group: VARIANT_GROUP.to_string(),
            });
        }
        if let Some(column) = Column::REQUIRED
            .into_iter()
            .find(|column| !positions.contains_key(column))
        {
            return Err(SvevalError::missing_column(column.name()));
        }
        Ok(Self { positions })
    }

    fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.positions.keys().copied()
    }

    fn raw<'r>(&self, row: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.positions
            .get(&column)
            .and_then(|&i| row.get(i))
            .map(str::trim)
    }

    /// Cell value, or `None` when the column is absent or the cell is null.
    fn value<'r>(&self, row: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.raw(row, column).filter(|value| !is_missing(value))
    }
}

fn invalid_field(line: usize, column: Column, value: &str) -> SvevalError {
    SvevalError::InvalidField {
        line,
        column: column.name().to_string(),
        value: value.to_string(),
    }
}

/// Parses an integer cell, accepting whole-valued floats such as `300.0`.
pub fn parse_int(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "True" | "true" | "TRUE" | "1" => Some(true),
        "False" | "false" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

fn int_field(
    layout: &GroupLayout,
    row: &StringRecord,
    column: Column,
    line: usize,
) -> Result<Option<i64>> {
    layout
        .value(row, column)
        .map(|value| parse_int(value).ok_or_else(|| invalid_field(line, column, value)))
        .transpose()
}

fn parse_record(
    layout: &GroupLayout,
    row: &StringRecord,
    index: usize,
    line: usize,
) -> Result<VariantRecord> {
    let text = |column: Column| layout.raw(row, column).unwrap_or_default().to_string();

    let pos = int_field(layout, row, Column::Pos, line)?.ok_or_else(|| {
        invalid_field(
            line,
            Column::Pos,
            layout.raw(row, Column::Pos).unwrap_or_default(),
        )
    })?;

    let af = layout
        .value(row, Column::Af)
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|_| invalid_field(line, Column::Af, value))
        })
        .transpose()?;

    let is_tp = layout
        .value(row, Column::IsTp)
        .map(|value| parse_bool(value).ok_or_else(|| invalid_field(line, Column::IsTp, value)))
        .transpose()?
        .unwrap_or(false);

    Ok(VariantRecord {
        index,
        chrom: text(Column::Chrom),
        pos,
        ref_allele: text(Column::Ref),
        alt_allele: text(Column::Alt),
        svtype: layout.value(row, Column::Svtype).map(str::to_string),
        svlen: int_field(layout, row, Column::Svlen, line)?,
        end: int_field(layout, row, Column::End, line)?,
        af,
        matching: int_field(layout, row, Column::Matching, line)?,
        is_tp,
    })
}

/// Parses a tab-separated call table with a group/column header pair.
///
/// Only columns under the `VARIANT` group are read. Records are indexed by
/// their data row, starting at 0. `path` is only used in error messages.
pub fn parse_variant_table<R: Read>(reader: R, path: &Path) -> Result<VariantTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = csv_reader.records();

    let mut header = Vec::with_capacity(HEADER_ROWS);
    for _ in 0..HEADER_ROWS {
        match rows.next() {
            Some(row) => header.push(row?),
            None => {
                return Err(SvevalError::MissingHeader {
                    path: path.to_path_buf(),
                })
            }
        }
    }
    let layout = GroupLayout::resolve(&header[0], &header[1], path)?;

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let row = row?;
        let line = index + HEADER_ROWS + 1;
        records.push(parse_record(&layout, &row, index, line)?);
    }

    log::debug!(
        "Read {} records from {} ({} columns: {})",
        format_number_with_commas(records.len()),
        path.display(),
        layout.positions.len(),
        layout
            .columns()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(",")
    );
    Ok(VariantTable::new(layout.columns(), records))
}

pub fn read_variant_table<P: AsRef<Path>>(path: P) -> Result<VariantTable> {
    let path = path.as_ref();
    let reader = open_table_reader(path)?;
    parse_variant_table(reader, path)
}
