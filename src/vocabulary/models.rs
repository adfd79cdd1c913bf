//! Award and funder vocabulary entries

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference from an award to its funder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunderRef {
    /// Funder identifier (ROR id for vocabulary funders)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Funder display name (custom funders only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Award vocabulary entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Award {
    /// Award identifier, `<funder ror>::<number>` for vocabulary awards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Grant number as assigned by the funder
    #[serde(default)]
    pub number: String,
    /// Localised titles keyed by language code
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub title: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acronym: Option<String>,
    /// Funder the award belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funder: Option<FunderRef>,
}

/// Scheme/identifier pair attached to a funder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunderIdentifier {
    pub scheme: String,
    pub identifier: String,
}

/// Funder vocabulary entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Funder {
    /// ROR identifier
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<FunderIdentifier>,
}

impl Funder {
    /// The funder's DOI if it carries one among its identifiers
    pub fn doi(&self) -> Option<&str> {
        self.identifiers
            .iter()
            .find(|i| i.scheme == "doi")
            .map(|i| i.identifier.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_funder_doi_identifier() {
        let funder: Funder = serde_json::from_value(json!({
            "id": "021nxhr62",
            "name": "National Science Foundation",
            "identifiers": [
                {"scheme": "ror", "identifier": "021nxhr62"},
                {"scheme": "doi", "identifier": "10.13039/100000001"}
            ]
        }))
        .unwrap();
        assert_eq!(funder.doi(), Some("10.13039/100000001"));
    }

    #[test]
    fn test_award_without_funder() {
        let award: Award = serde_json::from_value(json!({"number": "42"})).unwrap();
        assert!(award.funder.is_none());
        assert!(award.id.is_none());
    }
}
