use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chat-platform user id (a Discord snowflake). Serialized as a string; parsed from a string or a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(UserId(n)),
            Raw::Str(s) => s.trim().parse().map(UserId).map_err(serde::de::Error::custom),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upper-case ticker. Construct with [`Symbol::new`] so the casing is always normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Returns `None` for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let sym = raw.trim().to_uppercase();
        if sym.is_empty() {
            return None;
        }
        Some(Self(sym))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// One pending price target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub price: f64,
}

/// A (user, symbol) watch with its pending targets, in insertion order.
#[derive(Debug, Clone)]
pub struct WatchEntry {
    pub owner: UserId,
    pub symbol: Symbol,
    pub targets: Vec<Target>,
}

impl WatchEntry {
    pub fn prices(&self) -> Vec<f64> {
        self.targets.iter().map(|t| t.price).collect()
    }
}

/// Everyone watching one symbol at snapshot time.
#[derive(Debug, Clone)]
pub struct SymbolWatch {
    pub symbol: Symbol,
    pub watchers: Vec<(UserId, Target)>,
}

pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// `current >= target`. Reaching the target counts as a crossing.
pub fn is_crossed(current: f64, target: f64) -> bool {
    current >= target
}
