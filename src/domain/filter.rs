//! Filter - Active Search/Filter Criterion

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of filter, without its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    Name,
    Category,
    Generation,
    Location,
    Move,
    Region,
    Game,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Name => "name",
            FilterKind::Category => "type",
            FilterKind::Generation => "generation",
            FilterKind::Location => "location",
            FilterKind::Move => "move",
            FilterKind::Region => "region",
            FilterKind::Game => "game",
        }
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(FilterKind::Name),
            "type" | "category" => Ok(FilterKind::Category),
            "generation" => Ok(FilterKind::Generation),
            "location" => Ok(FilterKind::Location),
            "move" => Ok(FilterKind::Move),
            "region" => Ok(FilterKind::Region),
            "game" => Ok(FilterKind::Game),
            other => Err(Error::Invalid {
                message: format!("unknown filter kind '{other}'"),
            }),
        }
    }
}

/// Exactly one active criterion driving a pagination controller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum FilterSpec {
    /// Free-text relevance search
    Name(String),
    /// Category ("type") name, e.g. `fire`
    Category(String),
    /// Generation index, 1-based
    Generation(u32),
    /// Location id or name
    Location(String),
    /// Move id or name
    Move(String),
    /// Region id or name
    Region(String),
    /// Curated game identifier, e.g. `red-green`
    Game(String),
}

impl FilterSpec {
    /// Build a filter from a picker's `(kind, value)` pair
    pub fn parse(kind: &str, value: &str) -> Result<Self> {
        let kind: FilterKind = kind.parse()?;
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::Invalid {
                message: format!("empty value for filter '{}'", kind.as_str()),
            });
        }
        let spec = match kind {
            FilterKind::Name => FilterSpec::Name(value.to_string()),
            FilterKind::Category => FilterSpec::Category(value.to_ascii_lowercase()),
            FilterKind::Generation => {
                let index = value.parse::<u32>().map_err(|_| Error::Invalid {
                    message: format!("generation must be a number, got '{value}'"),
                })?;
                FilterSpec::Generation(index)
            }
            FilterKind::Location => FilterSpec::Location(value.to_string()),
            FilterKind::Move => FilterSpec::Move(value.to_ascii_lowercase()),
            FilterKind::Region => FilterSpec::Region(value.to_ascii_lowercase()),
            FilterKind::Game => FilterSpec::Game(value.to_ascii_lowercase()),
        };
        Ok(spec)
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            FilterSpec::Name(_) => FilterKind::Name,
            FilterSpec::Category(_) => FilterKind::Category,
            FilterSpec::Generation(_) => FilterKind::Generation,
            FilterSpec::Location(_) => FilterKind::Location,
            FilterSpec::Move(_) => FilterKind::Move,
            FilterSpec::Region(_) => FilterKind::Region,
            FilterSpec::Game(_) => FilterKind::Game,
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::Generation(index) => write!(f, "generation={index}"),
            FilterSpec::Name(v)
            | FilterSpec::Category(v)
            | FilterSpec::Location(v)
            | FilterSpec::Move(v)
            | FilterSpec::Region(v)
            | FilterSpec::Game(v) => write!(f, "{}={}", self.kind().as_str(), v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_picker_values() {
        assert_eq!(
            FilterSpec::parse("type", "Fire").expect("type"),
            FilterSpec::Category("fire".into())
        );
        assert_eq!(
            FilterSpec::parse("generation", "3").expect("generation"),
            FilterSpec::Generation(3)
        );
        assert_eq!(
            FilterSpec::parse("game", "red-green").expect("game"),
            FilterSpec::Game("red-green".into())
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(FilterSpec::parse("generation", "three").is_err());
        assert!(FilterSpec::parse("color", "red").is_err());
        assert!(FilterSpec::parse("move", "   ").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(FilterSpec::Category("water".into()).to_string(), "type=water");
        assert_eq!(FilterSpec::Generation(1).to_string(), "generation=1");
    }
}
