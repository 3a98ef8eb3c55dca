//! Loaders for the optional provider-mapping side files: CSV range rules,
//! the satellites XML, and the JSON channel-name lookup. Each is loaded
//! once per run and handed to the resolver.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::AppError;

/// One frequency-range rule from `provider_mapping.csv`.
///
/// Ranges are inclusive and need not be disjoint; the first matching rule
/// in file order wins.
#[derive(Debug, Clone, Deserialize)]
pub struct RangeRule {
    pub satellite: String,
    #[serde(default)]
    pub position: String,
    pub freq_min: u32,
    pub freq_max: u32,
    #[serde(default)]
    pub pol: String,
    pub provider: String,
    #[serde(default)]
    pub package: String,
}

impl RangeRule {
    pub fn matches(&self, satellite: &str, frequency: u32) -> bool {
        satellite
            .to_lowercase()
            .contains(&self.satellite.to_lowercase())
            && (self.freq_min..=self.freq_max).contains(&frequency)
    }
}

pub fn load_range_rules(path: &Path) -> Result<Vec<RangeRule>, AppError> {
    if !path.exists() {
        return Err(AppError::MissingInput(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rules = Vec::new();
    for result in reader.deserialize() {
        let rule: RangeRule = result?;
        rules.push(rule);
    }
    log::info!("Loaded {} provider range rules from {}", rules.len(), path.display());
    Ok(rules)
}

/// `(position, frequency MHz) -> provider`, from a satellites XML document:
/// `<sat position=.. name=..>` elements holding `<transponder frequency=..
/// provider=..>` children. Transponder frequencies are in kHz; the first
/// provider seen for a key wins.
pub type PositionTable = HashMap<(i32, u32), String>;

pub fn load_position_table(path: &Path) -> Result<PositionTable, AppError> {
    if !path.exists() {
        return Err(AppError::MissingInput(path.to_path_buf()));
    }
    let mut reader = Reader::from_file(path)
        .map_err(|e| AppError::Other(format!("{}: {}", path.display(), e)))?;
    reader.config_mut().trim_text(true);

    let mut table = PositionTable::new();
    let mut current_position: Option<i32> = None;
    let mut buf = Vec::new();
    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| AppError::Other(format!("{}: {}", path.display(), e)))?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => match e.name().as_ref() {
                b"sat" => {
                    current_position = attr_value(e, b"position")?.and_then(|v| v.parse().ok());
                }
                b"transponder" => {
                    let Some(position) = current_position else {
                        continue;
                    };
                    let freq_khz: u64 = attr_value(e, b"frequency")?
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0);
                    let provider = attr_value(e, b"provider")?.unwrap_or_default();
                    let freq_mhz = (freq_khz / 1000) as u32;
                    if freq_mhz > 0 && !provider.is_empty() {
                        table.entry((position, freq_mhz)).or_insert(provider);
                    }
                }
                _ => {}
            },
            Event::End(ref e) if e.name().as_ref() == b"sat" => {
                current_position = None;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    log::info!(
        "Loaded {} transponder providers from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

fn attr_value(
    e: &quick_xml::events::BytesStart<'_>,
    key: &[u8],
) -> Result<Option<String>, AppError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| AppError::Other(format!("bad XML attribute: {}", e)))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| AppError::Other(format!("bad XML attribute value: {}", e)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Normalized channel name -> provider, from `channel_providers.json`.
pub fn load_channel_lookup(path: &Path) -> Result<HashMap<String, String>, AppError> {
    if !path.exists() {
        return Err(AppError::MissingInput(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let raw: HashMap<String, String> = serde_json::from_str(&content)?;
    let lookup = raw
        .into_iter()
        .map(|(name, provider)| (normalize_channel_name(&name), provider))
        .collect::<HashMap<_, _>>();
    log::info!(
        "Loaded {} channel-name providers from {}",
        lookup.len(),
        path.display()
    );
    Ok(lookup)
}

/// Lowercase, whitespace-collapsed form used for name lookups.
pub fn normalize_channel_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn range_rules_load_with_defaulted_columns() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("provider_mapping.csv");
        std::fs::write(
            &path,
            "satellite,freq_min,freq_max,provider\n\
             Astra,11000,11500,Canal+\n\
             Hotbird,12000,12500,Sky Italia\n",
        )
        .unwrap();

        let rules = load_range_rules(&path).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].provider, "Canal+");
        // position, pol and package columns are absent and default empty.
        assert_eq!(rules[0].position, "");
        assert_eq!(rules[0].pol, "");
        assert_eq!(rules[0].package, "");
        assert!(rules[0].matches("Astra 19.2E", 11250));
        assert!(!rules[1].matches("Astra 19.2E", 12250));
    }

    #[test]
    fn position_table_converts_to_mhz_and_keeps_the_first_provider() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("satellites.xml");
        std::fs::write(
            &path,
            r#"<satellites>
  <sat name="Hotbird 13.0E" position="130">
    <transponder frequency="11200000" provider="Rai"/>
    <transponder frequency="11200000" provider="Mediaset"/>
    <transponder frequency="10714000" provider="Sky Italia"></transponder>
    <transponder provider="NoFrequency"/>
    <transponder frequency="12000000" provider=""/>
  </sat>
  <sat name="NoPosition">
    <transponder frequency="11500000" provider="Ghost"/>
  </sat>
</satellites>"#,
        )
        .unwrap();

        let table = load_position_table(&path).unwrap();
        // The duplicate key keeps its first provider; entries without a
        // frequency, provider or parent position are dropped.
        assert_eq!(table.len(), 2);
        assert_eq!(table[&(130, 11200)], "Rai");
        assert_eq!(table[&(130, 10714)], "Sky Italia");
    }

    #[test]
    fn channel_lookup_normalizes_its_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("channel_providers.json");
        std::fs::write(
            &path,
            r#"{"  beIN   Sports 1 HD ": "beIN France", "Rai 1": "Rai"}"#,
        )
        .unwrap();

        let lookup = load_channel_lookup(&path).unwrap();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup["bein sports 1 hd"], "beIN France");
        assert_eq!(lookup["rai 1"], "Rai");
    }

    #[test]
    fn missing_side_files_are_reported_as_missing_input() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.csv");
        assert!(matches!(
            load_range_rules(&missing),
            Err(AppError::MissingInput(_))
        ));
        assert!(matches!(
            load_position_table(&missing),
            Err(AppError::MissingInput(_))
        ));
        assert!(matches!(
            load_channel_lookup(&missing),
            Err(AppError::MissingInput(_))
        ));
    }
}
