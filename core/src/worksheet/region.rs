use serde::{Deserialize, Deserializer};

use crate::parser::Expr;

/// One positioned unit of notation on the worksheet canvas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Region {
    /// Opaque identifier. JSON integers are accepted and kept as their
    /// decimal string.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub content: String,
    pub x: f64,
    pub y: f64,
}

impl Region {
    pub fn new(id: impl Into<String>, content: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            x,
            y,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Signed(n) => n.to_string(),
        Id::Unsigned(n) => n.to_string(),
    })
}

/// The role a region plays in the worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// `g ≡ 20`: visible to every region regardless of position.
    GlobalDefinition,
    /// `a := 5`: visible to regions after it in reading order.
    LocalDefinition,
    Expression,
    /// `plot(f, x, start, end)`
    Plot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionBody {
    Expr(Expr),
    /// Raw text between the parentheses of `plot(...)`.
    Plot(String),
}

/// A region after classification. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRegion {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub kind: RegionKind,
    /// Present iff `kind` is a definition.
    pub bound_name: Option<String>,
    pub body: RegionBody,
    /// The region asked for symbolic output (`x + 1 →`).
    pub symbolic: bool,
}
