/// Top-level header label selecting the working columns of a call table.
pub const VARIANT_GROUP: &str = "VARIANT";

/// Prefix pattern for autosomal contig names.
pub const AUTOSOME_PATTERN: &str = r"^(chr)?[0-9]+";

/// Cell values read as null.
pub const MISSING_VALUES: &[&str] = &["", ".", "NA", "N/A", "NaN", "nan", "NULL", "null", "None"];

pub const DEFAULT_MINLEN: Option<i64> = None;
pub const DEFAULT_MAXLEN: Option<i64> = None;
pub const DEFAULT_MIN_AF: Option<f64> = None;
pub const DEFAULT_MAX_AF: Option<f64> = None;
