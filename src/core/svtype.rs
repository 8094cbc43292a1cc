use crate::{error::SvevalError, utils::util::Result};
use serde::{Deserialize, Serialize};

/// Variant classes a call table can be restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SvType {
    INSERTION,
    DELETION,
}

impl SvType {
    pub fn from_u8(bytes: &[u8]) -> Result<Self> {
        match bytes {
            b"INS" => Ok(SvType::INSERTION),
            b"DEL" => Ok(SvType::DELETION),
            _ => Err(SvevalError::UnsupportedVarType {
                value: String::from_utf8_lossy(bytes).into_owned(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SvType::INSERTION => "INS",
            SvType::DELETION => "DEL",
        }
    }

    /// Allele-shape heuristic for records without an SVTYPE annotation.
    ///
    /// A deletion has a multi-base REF and a single-base ALT, an insertion
    /// the reverse.
    pub fn matches_alleles(&self, ref_allele: &str, alt_allele: &str) -> bool {
        match self {
            SvType::DELETION => ref_allele.len() > 1 && alt_allele.len() == 1,
            SvType::INSERTION => ref_allele.len() == 1 && alt_allele.len() > 1,
        }
    }
}

impl std::str::FromStr for SvType {
    type Err = SvevalError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_u8(s.as_bytes())
    }
}

impl TryFrom<String> for SvType {
    type Error = SvevalError;
    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SvType> for String {
    fn from(svtype: SvType) -> Self {
        svtype.as_str().to_string()
    }
}

impl std::fmt::Display for SvType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
