#[cfg(test)]
pub(crate) mod test_utils;

use std::{collections::BTreeSet, fmt};

/// Known columns of the `VARIANT` header group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Chrom,
    Pos,
    Ref,
    Alt,
    Svtype,
    Svlen,
    End,
    Af,
    Matching,
    IsTp,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Chrom,
        Column::Pos,
        Column::Ref,
        Column::Alt,
        Column::Svtype,
        Column::Svlen,
        Column::End,
        Column::Af,
        Column::Matching,
        Column::IsTp,
    ];

    pub const REQUIRED: [Column; 4] = [Column::Chrom, Column::Pos, Column::Ref, Column::Alt];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Chrom => "CHROM",
            Column::Pos => "POS",
            Column::Ref => "REF",
            Column::Alt => "ALT",
            Column::Svtype => "SVTYPE",
            Column::Svlen => "SVLEN",
            Column::End => "END",
            Column::Af => "AF",
            Column::Matching => "MATCHING",
            Column::IsTp => "is_tp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.name() == name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    /// 0-based data row in the source table, fixed at load time.
    pub index: usize,
    pub chrom: String,
    pub pos: i64,
    pub ref_allele: String,
    pub alt_allele: String,
    pub svtype: Option<String>,
    pub svlen: Option<i64>,
    pub end: Option<i64>,
    pub af: Option<f64>,
    /// Truth-set index of the matched variant, negative or `None` if unmatched.
    pub matching: Option<i64>,
    pub is_tp: bool,
}

impl VariantRecord {
    pub fn is_matched(&self) -> bool {
        self.matching.is_some_and(|m| m >= 0)
    }

    pub fn allele_len_diff(&self) -> i64 {
        i64::try_from(self.alt_allele.len().abs_diff(self.ref_allele.len())).unwrap_or(i64::MAX)
    }
}

impl fmt::Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "(index: {}, chrom: {}, pos: {}, svtype: {}, svlen: {})",
            self.index,
            self.chrom,
            self.pos,
            self.svtype.as_deref().unwrap_or("."),
            self.svlen.map_or_else(|| ".".to_string(), |l| l.to_string())
        )
    }
}

/// An ordered set of variant records together with the columns the source
/// table provided.
///
/// Tables are never modified in place: every filter builds a new table and
/// records keep the index they were loaded with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantTable {
    columns: BTreeSet<Column>,
    records: Vec<VariantRecord>,
}

impl VariantTable {
    pub fn new(columns: impl IntoIterator<Item = Column>, records: Vec<VariantRecord>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariantRecord> {
        self.records.iter()
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Whether a record with the given load-time index survived in this table.
    pub fn contains_index(&self, index: i64) -> bool {
        usize::try_from(index)
            .is_ok_and(|index| self.records.iter().any(|record| record.index == index))
    }

    pub fn indices(&self) -> Vec<usize> {
        self.records.iter().map(|record| record.index).collect()
    }

    pub fn matched_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_matched()).count()
    }

    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&VariantRecord) -> bool,
    {
        Self {
            columns: self.columns.clone(),
            records: self
                .records
                .iter()
                .filter(|record| predicate(record))
                .cloned()
                .collect(),
        }
    }

    /// Builds a new table by transforming every record, optionally declaring
    /// an extra column as populated.
    pub fn map<F>(&self, added: Option<Column>, f: F) -> Self
    where
        F: FnMut(&VariantRecord) -> VariantRecord,
    {
        let mut columns = self.columns.clone();
        columns.extend(added);
        Self {
            columns,
            records: self.records.iter().map(f).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a VariantTable {
    type Item = &'a VariantRecord;
    type IntoIter = std::slice::Iter<'a, VariantRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
