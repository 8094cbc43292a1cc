use super::{Column, VariantRecord, VariantTable};
use std::io::Write;
use tempfile::NamedTempFile;

pub fn record(index: usize, chrom: &str, ref_allele: &str, alt_allele: &str) -> VariantRecord {
    VariantRecord {
        index,
        chrom: chrom.to_string(),
        pos: 1000 + 100 * index as i64,
        ref_allele: ref_allele.to_string(),
        alt_allele: alt_allele.to_string(),
        svtype: None,
        svlen: None,
        end: None,
        af: None,
        matching: None,
        is_tp: false,
    }
}

pub fn with(mut record: VariantRecord, updates: impl FnOnce(&mut VariantRecord)) -> VariantRecord {
    updates(&mut record);
    record
}

/// Table exposing only the required columns.
pub fn table(records: Vec<VariantRecord>) -> VariantTable {
    VariantTable::new(Column::REQUIRED, records)
}

pub fn table_with(records: Vec<VariantRecord>, extra: &[Column]) -> VariantTable {
    VariantTable::new(
        Column::REQUIRED.into_iter().chain(extra.iter().copied()),
        records,
    )
}

/// Truth table of `n` unannotated deletions indexed 0..n.
pub fn truth(n: usize) -> VariantTable {
    table((0..n).map(|i| record(i, "chr1", "ACGT", "A")).collect())
}

/// Renders a two-level header table where every column belongs to `group`.
pub fn tsv(group: &str, columns: &[&str], rows: &[&[&str]]) -> String {
    let mut contents = String::new();
    contents.push_str(&vec![group; columns.len()].join("\t"));
    contents.push('\n');
    contents.push_str(&columns.join("\t"));
    contents.push('\n');
    for row in rows {
        contents.push_str(&row.join("\t"));
        contents.push('\n');
    }
    contents
}

pub fn write_table(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be created");
    file.write_all(contents.as_bytes())
        .expect("temp file should be writable");
    file.flush().expect("temp file should flush");
    file
}
