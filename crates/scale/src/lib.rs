//! # Magnitude Scale
//!
//! Finds the numeric literals in a body of text, works out which scale each
//! one is written in, and ranks the scaled values.
//!
//! ## Architecture
//!
//! ```text
//! Text
//!     │
//!     ├──> Tokenizer → LiteralMatch (lazy, document order)
//!     │    ├─> plain, grouped, scientific and power literals
//!     │    └─> attached suffixes (150K, 2bn)
//!     │
//!     ├──> ContextWindow (N characters each side)
//!     │
//!     ├──> ScaleResolver
//!     │    ├─> suffix > power > scientific
//!     │    └─> words > metric prefixes > abbreviations, nearest cue first
//!     │
//!     ├──> scale() → ScaledNumber (exact decimal, overflow guarded)
//!     │
//!     └──> RankingAggregator → RankedResult (maximum, top-N, diagnostics)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use magnitude_scale::{Analyzer, AnalyzerConfig, ScaleSource};
//!
//! let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
//! let result = analyzer.analyze("Revenue: $3.5 million. Population: 450,000.");
//!
//! let max = result.maximum().unwrap();
//! assert_eq!(max.resolution.source, ScaleSource::Word);
//! println!("{}", max.provenance());
//! ```

mod analyzer;
mod config;
mod dictionary;
mod error;
pub mod format;
mod ranking;
mod resolver;
mod scaler;
mod tokenizer;
mod types;
mod window;

pub use analyzer::{analyze, Analyzer, Scan};
pub use config::{AnalysisMode, AnalyzerConfig};
pub use dictionary::ScaleDictionary;
pub use error::{Result, ScaleError};
pub use ranking::{RankedResult, RankingAggregator};
pub use resolver::ScaleResolver;
pub use scaler::scale;
pub use tokenizer::Tokenizer;
pub use types::{
    pow10, AttachedSuffix, Diagnostics, LiteralMatch, LiteralNotation, ScaleResolution,
    ScaleSource, ScaledNumber,
};
pub use window::ContextWindow;
