pub mod error;

pub mod core {
    pub mod filter;
    pub mod metrics;
    pub mod svtype;
    pub mod variant;
}

pub mod io {
    pub mod readers;
    pub mod table_reader;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
pub use crate::core::{
    filter::{filter_variants, load_variants, FilterOptions},
    metrics::{evaluate, phred_scale, precision, recall, EvalSummary},
    svtype::SvType,
    variant::{Column, VariantRecord, VariantTable},
};
pub use error::{SvevalError, SvevalResult};
pub use io::table_reader::read_variant_table;
