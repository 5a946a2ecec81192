//! Table rows for access rules

use super::table::Tabular;
use crate::access_rules::AccessRule;

impl Tabular for AccessRule {
    const HEADERS: &'static [&'static str] =
        &["ID", "Mode", "Target", "Value", "Scope", "Notes", "Modified"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.mode.to_string(),
            self.configuration.target().to_string(),
            self.configuration.value().to_string(),
            self.scope_type().to_string(),
            self.notes.clone(),
            self.modified_on.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_rule_row() {
        let rule: AccessRule = serde_json::from_value(serde_json::json!({
            "id": "92f17202ed8bd63d69a66b86a49a8f6b",
            "notes": "office",
            "allowed_modes": ["block", "challenge", "whitelist", "js_challenge"],
            "mode": "whitelist",
            "scope": {"type": "zone"},
            "configuration": {"target": "ip_range", "value": "203.0.113.0/24"}
        }))
        .unwrap();

        let row = rule.row();
        assert_eq!(row.len(), AccessRule::HEADERS.len());
        assert_eq!(row[1], "whitelist");
        assert_eq!(row[2], "ip_range");
        assert_eq!(row[3], "203.0.113.0/24");
        assert_eq!(row[4], "zone");
        assert_eq!(row[6], "");
    }
}
