//! Heuristic report-line parser
//!
//! Table reports in the wild are loosely specified: pipe-delimited exports,
//! whitespace-delimited listings, and free-text summaries all occur, with no
//! formal grammar. Extraction is therefore a chain of strategies tried in
//! priority order over the whole document; the first strategy that yields any
//! entries wins. Strategies are never mixed per line within one parse call.
//!
//! Parsing never fails: unparseable lines are skipped, an unparseable count
//! becomes "count unknown" for that line, and input that matches nothing
//! produces an empty inventory.

use crate::inventory::Inventory;
use crate::{CONTEXT_WINDOW, IMPLAUSIBLE_COUNT};
use log::debug;
use regex::Regex;

/// Marker token identifying table rows in structured exports.
const TABLE_MARKER: &str = "table";

/// How many fields past the expected count position the labeled-column
/// strategy scans before giving up on a line's count.
const COUNT_SCAN_WINDOW: usize = 5;

/// Tokens that are structural vocabulary in reports, never table names.
const STRUCTURAL_KEYWORDS: &[&str] = &[
    "row", "rows", "length", "size", "description", "count", "records", "type",
];

/// A single extraction heuristic applied to a whole document.
trait ExtractionStrategy {
    fn name(&self) -> &'static str;
    fn extract(&self, text: &str, inventory: &mut Inventory);
}

/// Report parser backed by an ordered chain of extraction strategies.
pub struct ReportParser {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ReportParser {
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(LabeledColumnStrategy),
                Box::new(FallbackRegexStrategy::new()),
                Box::new(ScoredCandidateStrategy::new()),
            ],
        }
    }

    /// Parse report text into a normalized inventory.
    ///
    /// Strategies are tried in priority order; the first one that extracts
    /// at least one entry across the whole document supplies the result.
    pub fn parse(&self, text: &str) -> Inventory {
        for strategy in &self.strategies {
            let mut inventory = Inventory::new();
            strategy.extract(text, &mut inventory);
            if !inventory.is_empty() {
                debug!(
                    "strategy '{}' extracted {} entries",
                    strategy.name(),
                    inventory.len()
                );
                return inventory;
            }
        }
        debug!("no strategy extracted any entries");
        Inventory::new()
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse report text with the default strategy chain.
pub fn parse(text: &str) -> Inventory {
    ReportParser::new().parse(text)
}

/// Extract the first decimal-digit run from a field, allowing `,` thousands
/// separators, and parse it as a count. Returns `None` when the field has no
/// digits or the run does not fit in a `u64`.
fn extract_count(field: &str) -> Option<u64> {
    let bytes = field.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;
    let mut end = start;
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b',') {
        end += 1;
    }
    let run: String = field[start..end].chars().filter(|c| *c != ',').collect();
    run.parse().ok()
}

/// Strip thousands separators and parse a whole field as a count.
pub(crate) fn parse_count_token(field: &str) -> Option<u64> {
    let cleaned = field.trim().replace(',', "");
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Primary strategy for pipe-delimited exports.
///
/// Lines must carry a case-insensitive `TABLE` marker field. The table name
/// is the first non-empty field after the marker; the count is searched
/// starting two fields after the name (common layout:
/// `TABLE | name | description | count | ...`), scanning a few fields
/// forward for the first field containing a digit run.
struct LabeledColumnStrategy;

impl LabeledColumnStrategy {
    fn marker_field(fields: &[&str]) -> Option<usize> {
        fields.iter().position(|f| {
            f.eq_ignore_ascii_case(TABLE_MARKER)
                || f.split_whitespace()
                    .any(|token| token.eq_ignore_ascii_case(TABLE_MARKER))
        })
    }
}

impl ExtractionStrategy for LabeledColumnStrategy {
    fn name(&self) -> &'static str {
        "labeled-column"
    }

    fn extract(&self, text: &str, inventory: &mut Inventory) {
        for line in text.lines() {
            if !line.contains('|') || !line.to_lowercase().contains(TABLE_MARKER) {
                continue;
            }
            let fields: Vec<&str> = line.split('|').map(str::trim).collect();
            let Some(marker_idx) = Self::marker_field(&fields) else {
                continue;
            };
            let Some(name_idx) = (marker_idx + 1..fields.len()).find(|&i| !fields[i].is_empty())
            else {
                continue;
            };

            let scan_start = name_idx + 2;
            let count = (scan_start..fields.len().min(scan_start + COUNT_SCAN_WINDOW))
                .find_map(|i| extract_count(fields[i]));

            inventory.insert(fields[name_idx], count);
        }
    }
}

/// Fallback for documents without a clean marker/column layout: a permissive
/// "name, separator, integer" pattern. The pipe form is preferred; the
/// label form (`name: 123` / `name - 123`) is tried only when the pipe form
/// matches nothing.
struct FallbackRegexStrategy {
    pipe_pattern: Regex,
    label_pattern: Regex,
}

impl FallbackRegexStrategy {
    fn new() -> Self {
        Self {
            pipe_pattern: Regex::new(r"([A-Za-z0-9_.\-][A-Za-z0-9_.\- ]*?)\s*\|\s*([\d,]+)\b")
                .unwrap(),
            label_pattern: Regex::new(r"([A-Za-z0-9_.\-][A-Za-z0-9_.\- ]*?)\s*[:\-]\s*([\d,]+)\b")
                .unwrap(),
        }
    }

    fn extract_with(pattern: &Regex, text: &str, inventory: &mut Inventory) {
        for captures in pattern.captures_iter(text) {
            let name = captures[1].trim();
            if name.is_empty() {
                continue;
            }
            inventory.insert(name, parse_count_token(&captures[2]));
        }
    }
}

impl ExtractionStrategy for FallbackRegexStrategy {
    fn name(&self) -> &'static str {
        "fallback-regex"
    }

    fn extract(&self, text: &str, inventory: &mut Inventory) {
        Self::extract_with(&self.pipe_pattern, text, inventory);
        if inventory.is_empty() {
            Self::extract_with(&self.label_pattern, text, inventory);
        }
    }
}

/// Most permissive strategy, for structurally ambiguous reports.
///
/// Per line: the name is the token after a marker token when one exists,
/// else the first alphabetic token that is not structural vocabulary. The
/// count is chosen by scoring every integer-looking token on the line and
/// taking the highest scorer (ties broken by earliest position).
struct ScoredCandidateStrategy {
    word_pattern: Regex,
    number_pattern: Regex,
}

impl ScoredCandidateStrategy {
    fn new() -> Self {
        Self {
            word_pattern: Regex::new(r"[A-Za-z0-9_.\-]+").unwrap(),
            number_pattern: Regex::new(r"\d[\d,]*").unwrap(),
        }
    }

    fn is_name_token(token: &str) -> bool {
        token.chars().any(|c| c.is_ascii_alphabetic())
            && !STRUCTURAL_KEYWORDS.contains(&token.to_lowercase().as_str())
            && !token.eq_ignore_ascii_case(TABLE_MARKER)
    }

    /// Ranked name heuristic: token following a marker token, else the
    /// first alphabetic non-structural token on the line.
    fn extract_name<'a>(&self, line: &'a str) -> Option<&'a str> {
        let tokens: Vec<&str> = self
            .word_pattern
            .find_iter(line)
            .map(|m| m.as_str())
            .collect();

        if let Some(marker_idx) = tokens
            .iter()
            .position(|t| t.eq_ignore_ascii_case(TABLE_MARKER))
        {
            if let Some(token) = tokens.get(marker_idx + 1) {
                if Self::is_name_token(token) {
                    return Some(token);
                }
            }
        }

        tokens.into_iter().find(|t| Self::is_name_token(t))
    }

    /// Score a numeric candidate by lexical context.
    fn score_candidate(value: u64, token: &str, context: &str) -> i32 {
        let mut score = 0i32;

        // Thousands separators are a strong count signal
        if token.contains(',') {
            score += 20;
        }

        // Favor plausible large counts over small incidental numbers
        score += (value.checked_ilog10().unwrap_or(0) + 1) as i32;

        let context = context.to_lowercase();
        if ["record", "count", "rows"].iter().any(|w| context.contains(w)) {
            score += 30;
        }
        if ["mb", "kb", "gb"].iter().any(|w| context.contains(w)) {
            score -= 25;
        }
        if value > IMPLAUSIBLE_COUNT {
            // Too large to be a real record count; likely a corrupted match
            score -= 50;
        }

        score
    }

    fn extract_line_count(&self, line: &str) -> Option<u64> {
        let mut best: Option<(i32, u64)> = None;
        for m in self.number_pattern.find_iter(line) {
            let Some(value) = parse_count_token(m.as_str()) else {
                continue;
            };
            let context = context_window(line, m.start(), m.end());
            let score = Self::score_candidate(value, m.as_str(), context);
            // Strictly-greater keeps the earliest candidate on ties
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, value));
            }
        }
        best.map(|(_, value)| value)
    }
}

impl ExtractionStrategy for ScoredCandidateStrategy {
    fn name(&self) -> &'static str {
        "scored-candidate"
    }

    fn extract(&self, text: &str, inventory: &mut Inventory) {
        for line in text.lines() {
            let Some(name) = self.extract_name(line) else {
                continue;
            };
            inventory.insert(name, self.extract_line_count(line));
        }
    }
}

/// Slice the text around a token, clamped to char boundaries.
fn context_window(line: &str, start: usize, end: usize) -> &str {
    let mut lo = start.saturating_sub(CONTEXT_WINDOW);
    while !line.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + CONTEXT_WINDOW).min(line.len());
    while !line.is_char_boundary(hi) {
        hi += 1;
    }
    &line[lo..hi]
}
