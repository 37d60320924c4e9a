//! Option catalog: the fixed list of draftable options offered on each turn.
//!
//! Loaded once at startup and immutable afterwards, so a single
//! [`Catalog`] can be shared behind an `Arc` and drawn from by every
//! connection handler at once.

use std::fs;
use std::path::Path;

use rand::Rng;

use crate::{AppError, Result};

/// Source of randomized options offered to the participant on the clock.
pub trait OptionProvider: Send + Sync {
    /// Draw one option uniformly at random, with replacement.
    fn draw(&self) -> String;

    /// Number of distinct entries available.
    fn len(&self) -> usize;

    /// Whether the provider has nothing to offer.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Catalog read from a newline-delimited source. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    options: Vec<String>,
}

impl Catalog {
    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Startup` if the file cannot be read or contains
    /// no options.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            AppError::Startup(format!(
                "cannot read option catalog {}: {err}",
                path.display()
            ))
        })?;
        Self::parse(&raw)
    }

    /// Parse one option per line. Surrounding whitespace is trimmed and
    /// blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Startup` if no non-blank line remains.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_options(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Build a catalog from an already-split list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Startup` if `options` is empty.
    pub fn from_options(options: Vec<String>) -> Result<Self> {
        if options.is_empty() {
            return Err(AppError::Startup("option catalog is empty".into()));
        }
        Ok(Self { options })
    }

    /// All options in source order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

impl OptionProvider for Catalog {
    fn draw(&self) -> String {
        let index = rand::rng().random_range(0..self.options.len());
        self.options[index].clone()
    }

    fn len(&self) -> usize {
        self.options.len()
    }
}
