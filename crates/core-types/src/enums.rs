use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A categorical field of a `Sale` that can be filtered or grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    City,
    CustomerType,
    Gender,
    ProductLine,
    Branch,
}

impl Dimension {
    /// Returns the column header this dimension is read from.
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::City => "City",
            Dimension::CustomerType => "Customer_type",
            Dimension::Gender => "Gender",
            Dimension::ProductLine => "Product line",
            Dimension::Branch => "Branch",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Dimension::City => "city",
            Dimension::CustomerType => "customer type",
            Dimension::Gender => "gender",
            Dimension::ProductLine => "product line",
            Dimension::Branch => "branch",
        };
        f.write_str(label)
    }
}

impl FromStr for Dimension {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "city" => Ok(Dimension::City),
            "customer_type" => Ok(Dimension::CustomerType),
            "gender" => Ok(Dimension::Gender),
            "product_line" => Ok(Dimension::ProductLine),
            "branch" => Ok(Dimension::Branch),
            _ => Err(CoreError::UnknownDimension(s.to_string())),
        }
    }
}

/// How an average rating on the 0-10 scale maps to a count of star glyphs.
///
/// Both policies cap the count at `StarPolicy::MAX_STARS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum StarPolicy {
    /// Round the raw average to the nearest integer, then clamp.
    #[default]
    Clamp,
    /// Halve the average onto a five-star scale, then round.
    Halve,
}

impl StarPolicy {
    pub const MAX_STARS: u32 = 5;
}
