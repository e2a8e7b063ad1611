use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;
use crate::PricingResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One configured financing source. An empty `allowed_rates` means the
/// source accepts any merchant fee rate; a non-empty list is a closed set
/// whose first entry is the default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: String,
    pub display_name: String,
    #[serde(default)]
    pub allowed_rates: Vec<Percent>,
}

impl CatalogEntry {
    pub fn is_free_form(&self) -> bool {
        self.allowed_rates.is_empty()
    }

    pub fn default_rate(&self) -> Option<Percent> {
        self.allowed_rates.first().copied()
    }
}

/// Immutable table of financing sources. Built once at startup and passed
/// by reference into the engine; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinancingCatalog {
    entries: Vec<CatalogEntry>,
}

// ---------------------------------------------------------------------------
// Construction and lookup
// ---------------------------------------------------------------------------

impl FinancingCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a JSON array of entries.
    pub fn from_json_str(s: &str) -> PricingResult<Self> {
        let catalog: FinancingCatalog = serde_json::from_str(s)?;
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Resolve the effective rate for a submitted financing line.
    ///
    /// Sources with a closed rate set reject rates outside the set, but
    /// permissively: the submitted rate is replaced by the source's default
    /// and a warning is returned instead of failing the request. Unknown
    /// keys and free-form sources accept the rate as given.
    pub fn validate_rate(&self, key: &str, submitted: Percent) -> (Percent, Option<String>) {
        let entry = match self.get(key) {
            Some(e) if !e.is_free_form() => e,
            _ => return (submitted, None),
        };

        if entry.allowed_rates.contains(&submitted) {
            return (submitted, None);
        }

        // first entry is the catalog default
        let fallback = entry.allowed_rates[0];
        let warning = format!(
            "Rate {submitted}% is not offered by {}; using the default {fallback}%.",
            entry.display_name
        );
        (fallback, Some(warning))
    }
}

/// Built-in source table. Deployments replace it via `from_json_str` or
/// by constructing their own catalog.
impl Default for FinancingCatalog {
    fn default() -> Self {
        Self::new(vec![
            CatalogEntry {
                key: "consumer_bank".to_string(),
                display_name: "Consumer Bank Installments".to_string(),
                allowed_rates: vec![dec!(4.5), dec!(6.0), dec!(7.5)],
            },
            CatalogEntry {
                key: "retail_credit".to_string(),
                display_name: "Retail Credit Partner".to_string(),
                allowed_rates: vec![dec!(5.0), dec!(8.0)],
            },
            CatalogEntry {
                key: "in_house".to_string(),
                display_name: "In-house Plan".to_string(),
                allowed_rates: vec![],
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn closed_set_rate_passes_through() {
        let catalog = FinancingCatalog::default();
        let (rate, warning) = catalog.validate_rate("consumer_bank", dec!(6.0));
        assert_eq!(rate, dec!(6.0));
        assert!(warning.is_none());
    }

    #[test]
    fn off_menu_rate_substituted_with_default() {
        let catalog = FinancingCatalog::default();
        let (rate, warning) = catalog.validate_rate("consumer_bank", dec!(9.9));
        assert_eq!(rate, dec!(4.5));
        assert!(warning.unwrap().contains("Consumer Bank"));
    }

    #[test]
    fn free_form_and_unknown_sources_accept_any_rate() {
        let catalog = FinancingCatalog::default();
        let (rate, warning) = catalog.validate_rate("in_house", dec!(12.34));
        assert_eq!(rate, dec!(12.34));
        assert!(warning.is_none());

        let (rate, warning) = catalog.validate_rate("no_such_bank", dec!(3));
        assert_eq!(rate, dec!(3));
        assert!(warning.is_none());
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let json = r#"[
            {"key": "bank_a", "display_name": "Bank A", "allowed_rates": [2.5, 5.0]},
            {"key": "bank_b", "display_name": "Bank B"}
        ]"#;
        let catalog = FinancingCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.entries().len(), 2);
        assert_eq!(catalog.get("bank_a").unwrap().default_rate(), Some(dec!(2.5)));
        assert!(catalog.get("bank_b").unwrap().is_free_form());
    }
}
