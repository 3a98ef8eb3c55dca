pub mod mapping;
pub mod tables;

use regex::Regex;
use std::collections::HashMap;

use mapping::{normalize_channel_name, PositionTable, RangeRule};

/// Maximum distance between a queried frequency and a table entry for the
/// entry to still count as a match.
pub const FREQ_TOLERANCE_MHZ: u32 = 10;

/// Sentinel label for channels whose provider cannot be determined.
pub const UNKNOWN_PROVIDER: &str = "Other";

/// Resolves a content provider/package label for a channel.
///
/// All lookup tables are loaded once and injected at construction; resolution
/// is a pure function of the inputs. Sources, in priority order:
///
/// 1. the JSON channel-name lookup (exact, normalized);
/// 2. the built-in per-satellite frequency tables;
/// 3. CSV frequency-range rules (first matching rule in file order);
/// 4. the satellites-XML position table, keyed by translated orbital angle;
/// 5. name-pattern heuristics.
///
/// Point-frequency tables use one deterministic rule everywhere: exact match
/// first, otherwise the entry nearest in absolute distance within
/// ±[`FREQ_TOLERANCE_MHZ`], lowest frequency on a tie.
pub struct ProviderResolver {
    range_rules: Vec<RangeRule>,
    position_table: PositionTable,
    name_lookup: HashMap<String, String>,
    name_patterns: Vec<(Regex, &'static str)>,
}

impl Default for ProviderResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderResolver {
    /// Resolver over the built-in tables and name heuristics only.
    pub fn new() -> Self {
        let name_patterns = tables::NAME_PATTERNS
            .iter()
            .map(|(pattern, provider)| {
                (
                    Regex::new(pattern).expect("embedded name pattern must compile"),
                    *provider,
                )
            })
            .collect();
        Self {
            range_rules: Vec::new(),
            position_table: PositionTable::new(),
            name_lookup: HashMap::new(),
            name_patterns,
        }
    }

    pub fn with_range_rules(mut self, rules: Vec<RangeRule>) -> Self {
        self.range_rules = rules;
        self
    }

    pub fn with_position_table(mut self, table: PositionTable) -> Self {
        self.position_table = table;
        self
    }

    pub fn with_name_lookup(mut self, lookup: HashMap<String, String>) -> Self {
        self.name_lookup = lookup;
        self
    }

    /// Best-guess provider for a satellite descriptor and frequency, or
    /// `None` when no table covers it.
    pub fn resolve(&self, satellite: &str, frequency: u32) -> Option<&str> {
        if frequency == 0 {
            return None;
        }
        if let Some(table) = tables::builtin_table(satellite) {
            if let Some(provider) = nearest_within(table.iter().copied(), frequency) {
                return Some(provider);
            }
        }
        self.range_rules
            .iter()
            .find(|rule| rule.matches(satellite, frequency))
            .map(|rule| rule.provider.as_str())
    }

    /// Provider via the satellites-XML table, keyed by the translated
    /// orbital angle. Angles outside the translation table resolve nothing.
    pub fn resolve_by_position(&self, angle: i64, frequency: u32) -> Option<&str> {
        let position = tables::angle_to_position(angle)?;
        let entries = self
            .position_table
            .iter()
            .filter(|((pos, _), _)| *pos == position)
            .map(|((_, freq), provider)| (*freq, provider.as_str()));
        nearest_within(entries, frequency)
    }

    /// Provider from the channel display name: the JSON lookup first, then
    /// the ordered name-pattern heuristics.
    pub fn resolve_by_name(&self, channel_name: &str) -> Option<&str> {
        if channel_name.trim().is_empty() {
            return None;
        }
        let normalized = normalize_channel_name(channel_name);
        if let Some(provider) = self.name_lookup.get(&normalized) {
            return Some(provider.as_str());
        }
        self.name_patterns
            .iter()
            .find(|(pattern, _)| pattern.is_match(channel_name))
            .map(|(_, provider)| *provider)
    }

    /// Full resolution chain for one channel row.
    pub fn resolve_channel(
        &self,
        channel_name: &str,
        satellite: &str,
        angle: i64,
        frequency: u32,
    ) -> Option<&str> {
        let normalized = normalize_channel_name(channel_name);
        if let Some(provider) = self.name_lookup.get(&normalized) {
            return Some(provider.as_str());
        }
        self.resolve(satellite, frequency)
            .or_else(|| self.resolve_by_position(angle, frequency))
            .or_else(|| {
                self.name_patterns
                    .iter()
                    .find(|(pattern, _)| pattern.is_match(channel_name))
                    .map(|(_, provider)| *provider)
            })
    }

    /// Like [`resolve_channel`](Self::resolve_channel) but falls back to the
    /// [`UNKNOWN_PROVIDER`] sentinel; never fails.
    pub fn resolve_channel_or_unknown(
        &self,
        channel_name: &str,
        satellite: &str,
        angle: i64,
        frequency: u32,
    ) -> &str {
        self.resolve_channel(channel_name, satellite, angle, frequency)
            .unwrap_or(UNKNOWN_PROVIDER)
    }
}

/// Exact match first, then nearest absolute distance within tolerance,
/// lowest frequency breaking ties.
fn nearest_within<'a, I>(entries: I, frequency: u32) -> Option<&'a str>
where
    I: Iterator<Item = (u32, &'a str)>,
{
    entries
        .map(|(freq, provider)| (freq.abs_diff(frequency), freq, provider))
        .filter(|(distance, _, _)| *distance <= FREQ_TOLERANCE_MHZ)
        .min_by_key(|(distance, freq, _)| (*distance, *freq))
        .map(|(_, _, provider)| provider)
}
