use crate::config::{AnalysisMode, AnalyzerConfig};
use crate::dictionary::ScaleDictionary;
use crate::error::{Result, ScaleError};
use crate::ranking::{RankedResult, RankingAggregator};
use crate::resolver::ScaleResolver;
use crate::scaler;
use crate::tokenizer::Tokenizer;
use crate::types::{LiteralMatch, ScaleResolution, ScaledNumber};
use crate::window::ContextWindow;
use std::sync::OnceLock;

/// Main analyzer interface: text in, ranked scaled values out
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    dictionary: ScaleDictionary,
    resolver: ScaleResolver,
}

impl Analyzer {
    /// Create an analyzer with the built-in scale dictionary
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Self::with_dictionary(config, ScaleDictionary::builtin())
    }

    /// Create an analyzer with a substituted dictionary
    pub fn with_dictionary(config: AnalyzerConfig, dictionary: ScaleDictionary) -> Result<Self> {
        config.validate().map_err(ScaleError::invalid_config)?;
        dictionary.validate()?;
        let resolver = ScaleResolver::new(&dictionary, config.max_exponent)?;
        Ok(Self {
            config,
            dictionary,
            resolver,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    #[must_use]
    pub const fn dictionary(&self) -> &ScaleDictionary {
        &self.dictionary
    }

    /// Lazily scale every literal in `text`, in document order
    pub fn scan<'a>(&'a self, text: &'a str) -> Scan<'a> {
        Scan {
            analyzer: self,
            text,
            tokenizer: Tokenizer::new(text, &self.dictionary),
            page: None,
            char_base: 0,
        }
    }

    /// Rank the scaled literals of a single text blob
    pub fn analyze(&self, text: &str) -> RankedResult {
        let mut aggregator = RankingAggregator::new(self.config.top_n);
        let mut budget = self.config.max_input_chars;
        self.fold_page(text, None, 0, &mut budget, &mut aggregator);
        aggregator.finish()
    }

    /// Rank pages independently and merge their aggregates
    ///
    /// Offsets are global: each page starts one separator character after
    /// the previous one ends, matching a newline-joined text.
    pub fn analyze_pages<I, S>(&self, pages: I) -> RankedResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut total = RankingAggregator::new(self.config.top_n);
        let mut budget = self.config.max_input_chars;
        let mut char_base = 0;

        for (index, page) in pages.into_iter().enumerate() {
            let page = page.as_ref();
            let mut page_aggregate = RankingAggregator::new(self.config.top_n);
            self.fold_page(
                page,
                Some(index + 1),
                char_base,
                &mut budget,
                &mut page_aggregate,
            );
            log::debug!(
                "Page {}: {} literals",
                index + 1,
                page_aggregate.diagnostics().literals_seen
            );
            if (index + 1) % 10 == 0 {
                log::info!("Analyzed {} pages", index + 1);
            }
            total.merge(page_aggregate);
            char_base += page.chars().count() + 1;
        }

        total.finish()
    }

    fn fold_page(
        &self,
        text: &str,
        page: Option<usize>,
        char_base: usize,
        budget: &mut usize,
        aggregator: &mut RankingAggregator,
    ) {
        let (text, truncated) = clip_chars(text, *budget);
        if truncated {
            log::warn!(
                "Input exceeds {} characters; remaining text is ignored",
                self.config.max_input_chars
            );
            aggregator.note_truncated();
        }
        *budget = budget.saturating_sub(text.chars().count());

        let mut scan = Scan {
            analyzer: self,
            text,
            tokenizer: Tokenizer::new(text, &self.dictionary),
            page,
            char_base,
        };
        for number in scan.by_ref() {
            aggregator.offer(number);
        }
        aggregator.note_rejected(scan.rejected());
    }

    fn resolve(&self, text: &str, literal: &LiteralMatch) -> ScaleResolution {
        match self.config.mode {
            AnalysisMode::Literal => ScaleResolution::none(),
            AnalysisMode::Contextual => {
                let window = ContextWindow::around(text, literal, self.config.window_chars);
                self.resolver.resolve(literal, &window)
            }
        }
    }
}

/// Lazy stream of scaled literals produced by [`Analyzer::scan`]
pub struct Scan<'a> {
    analyzer: &'a Analyzer,
    text: &'a str,
    tokenizer: Tokenizer<'a, 'a>,
    page: Option<usize>,
    char_base: usize,
}

impl Scan<'_> {
    /// Candidates rejected by the tokenizer so far
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.tokenizer.rejected()
    }
}

impl Iterator for Scan<'_> {
    type Item = ScaledNumber;

    fn next(&mut self) -> Option<ScaledNumber> {
        let literal = self.tokenizer.next()?;
        let resolution = self.analyzer.resolve(self.text, &literal);
        log::debug!(
            "{} -> {} {:?}",
            literal.raw_text,
            resolution.source.as_str(),
            resolution.matched_text
        );
        Some(scaler::scale(
            literal.shifted(self.char_base),
            resolution,
            self.page,
        ))
    }
}

/// Rank `text` with the default configuration and built-in dictionary
pub fn analyze(text: &str) -> RankedResult {
    static DEFAULT: OnceLock<Analyzer> = OnceLock::new();
    DEFAULT
        .get_or_init(|| {
            Analyzer::new(AnalyzerConfig::default())
                .expect("default analyzer configuration is valid")
        })
        .analyze(text)
}

fn clip_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => (&text[..cut], true),
        None => (text, false),
    }
}
