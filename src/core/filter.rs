use crate::{
    constants::*,
    core::{
        svtype::SvType,
        variant::{Column, VariantRecord, VariantTable},
    },
    error::SvevalError,
    io::table_reader::read_variant_table,
    utils::util::{format_number_with_commas, Result},
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};


static AUTOSOME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(AUTOSOME_PATTERN).expect("autosome pattern must compile"));

/// Thresholds applied by [`filter_variants`].
///
/// Length and allele-frequency bounds only take effect when both ends of the
/// range are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub minlen: Option<i64>,
    pub maxlen: Option<i64>,
    pub vartype: Option<SvType>,
    pub min_af: Option<f64>,
    pub max_af: Option<f64>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, updates: impl FnOnce(&mut Self)) -> Self {
        updates(&mut self);
        self
    }

    pub fn length_bounds(&self) -> Option<(i64, i64)> {
        self.minlen.zip(self.maxlen)
    }

    pub fn af_bounds(&self) -> Option<(f64, f64)> {
        self.min_af.zip(self.max_af)
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            minlen: DEFAULT_MINLEN,
            maxlen: DEFAULT_MAXLEN,
            vartype: None,
            min_af: DEFAULT_MIN_AF,
            max_af: DEFAULT_MAX_AF,
        }
    }
}

pub fn is_autosome(chrom: &str) -> bool {
    AUTOSOME_RE.is_match(chrom)
}

/// Keeps records of the requested type.
///
/// With an SVTYPE column, annotated records are selected by their SVTYPE and
/// only unannotated ones fall back to the allele-shape heuristic.
pub fn filter_vartype(table: &VariantTable, svtype: SvType) -> VariantTable {
    let has_svtype = table.has_column(Column::Svtype);
    table.filter(|record| match record.svtype.as_deref() {
        Some(annotated) if has_svtype => annotated == svtype.as_str(),
        _ => svtype.matches_alleles(&record.ref_allele, &record.alt_allele),
    })
}

/// Populates SVLEN on every record unless the column is already complete.
pub fn derive_svlen(table: &VariantTable) -> VariantTable {
    if table.has_column(Column::Svlen) && table.iter().all(|r| r.svlen.is_some()) {
        return table.clone();
    }

    let use_end = table.has_column(Column::End) && table.iter().all(|r| r.end.is_some());
    if use_end {
        log::debug!("Deriving SVLEN from END - POS");
    } else {
        log::debug!("Deriving SVLEN from REF/ALT length difference");
    }

    table.map(Some(Column::Svlen), |record| {
        let svlen = match (use_end, record.end) {
            (true, Some(end)) => end.saturating_sub(record.pos),
            _ => record.allele_len_diff(),
        };
        VariantRecord {
            svlen: Some(svlen),
            ..record.clone()
        }
    })
}

fn length_in_range(svlen: i64, minlen: i64, maxlen: i64) -> bool {
    let len = svlen.unsigned_abs();
    let above_min = u64::try_from(minlen).map_or(true, |minlen| len >= minlen);
    let below_max = u64::try_from(maxlen).is_ok_and(|maxlen| len < maxlen);
    above_min && below_max
}

/// Keeps records with `minlen <= |SVLEN| < maxlen`.
pub fn filter_length(table: &VariantTable, minlen: i64, maxlen: i64) -> VariantTable {
    table.filter(|record| {
        record
            .svlen
            .is_some_and(|svlen| length_in_range(svlen, minlen, maxlen))
    })
}

pub fn filter_autosomes(table: &VariantTable) -> VariantTable {
    table.filter(|record| is_autosome(&record.chrom))
}

/// Keeps records with a negative MATCHING and records whose match survived in
/// `constrain`. Records without a MATCHING value are dropped.
pub fn filter_constrained(table: &VariantTable, constrain: &VariantTable) -> Result<VariantTable> {
    if !table.has_column(Column::Matching) {
        return Err(SvevalError::missing_column(Column::Matching.name()));
    }
    let truth_indices: HashSet<usize> = constrain.indices().into_iter().collect();
    Ok(table.filter(|record| match record.matching {
        None => false,
        Some(matching) => {
            matching < 0
                || usize::try_from(matching).is_ok_and(|index| truth_indices.contains(&index))
        }
    }))
}

/// Keeps records with `min_af <= AF <= max_af`; records without AF are dropped.
pub fn filter_allele_frequency(
    table: &VariantTable,
    min_af: f64,
    max_af: f64,
) -> Result<VariantTable> {
    if !table.has_column(Column::Af) {
        return Err(SvevalError::missing_column(Column::Af.name()));
    }
    Ok(table.filter(|record| record.af.is_some_and(|af| af >= min_af && af <= max_af)))
}

fn log_step(step: &str, table: &VariantTable) {
    log::debug!(
        "{} variants after {step} filter",
        format_number_with_commas(table.len())
    );
}

/// Runs the full filter pipeline over an in-memory table.
pub fn filter_variants(
    table: &VariantTable,
    options: &FilterOptions,
    constrain: Option<&VariantTable>,
) -> Result<VariantTable> {
    let svtype = options.vartype.ok_or(SvevalError::MissingVarType)?;

    let mut variants = filter_vartype(table, svtype);
    log_step(svtype.as_str(), &variants);

    variants = derive_svlen(&variants);
    if let Some((minlen, maxlen)) = options.length_bounds() {
        variants = filter_length(&variants, minlen, maxlen);
        log_step("length", &variants);
    }

    variants = filter_autosomes(&variants);
    log_step("autosome", &variants);

    if let Some(constrain) = constrain {
        variants = filter_constrained(&variants, constrain)?;
        log_step("truth constraint", &variants);
    }

    if let Some((min_af, max_af)) = options.af_bounds() {
        variants = filter_allele_frequency(&variants, min_af, max_af)?;
        log_step("allele frequency", &variants);
    }

    log::info!(
        "Total variants: {}",
        format_number_with_commas(variants.len())
    );
    if variants.has_column(Column::Matching) {
        log::info!(
            "Matching variants: {}",
            format_number_with_commas(variants.matched_count())
        );
    }
    Ok(variants)
}

/// Reads a call table and filters it, see [`filter_variants`].
pub fn load_variants<P: AsRef<Path>>(
    path: P,
    options: &FilterOptions,
    constrain: Option<&VariantTable>,
) -> Result<VariantTable> {
    let Some(svtype) = options.vartype else {
        return Err(SvevalError::MissingVarType);
    };
    let path = path.as_ref();
    log::debug!("Loading {svtype} calls from {}", path.display());
    let table = read_variant_table(path)?;
    filter_variants(&table, options, constrain)
}
