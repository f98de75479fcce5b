use std::fmt;

use crate::store::UserId;

use super::{Config, ConfigLayer};

/// Apply layers over the defaults, later layers winning.
pub fn merge_layers(layers: impl IntoIterator<Item = ConfigLayer>) -> Config {
    let mut config = Config::default();
    for layer in layers {
        layer.apply_to(&mut config);
    }
    config
}

/// An environment override that was set but could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredOverride {
    pub var: &'static str,
    pub reason: String,
}

impl fmt::Display for IgnoredOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}, ignoring: {}", self.var, self.reason)
    }
}

pub fn apply_env_overrides(config: &mut Config) -> Vec<IgnoredOverride> {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Invalid values leave the config untouched and are returned to the caller.
pub(crate) fn apply_overrides_from(
    config: &mut Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<IgnoredOverride> {
    let mut ignored = Vec::new();

    if let Some(raw) = lookup("CKS_RETENTION_DAYS") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            match trimmed.parse::<u64>() {
                Ok(days) => config.retention_days = days,
                Err(err) => ignored.push(IgnoredOverride {
                    var: "CKS_RETENTION_DAYS",
                    reason: format!("`{trimmed}`: {err}"),
                }),
            }
        }
    }

    if let Some(raw) = lookup("CKS_USER") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            match UserId::parse(trimmed) {
                Ok(user) => config.user_id = Some(user),
                Err(err) => ignored.push(IgnoredOverride {
                    var: "CKS_USER",
                    reason: err.to_string(),
                }),
            }
        }
    }

    if let Some(raw) = lookup("CKS_REFERENCE_DATA") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            config.reference_data = Some(trimmed.into());
        }
    }

    ignored
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn merge_layers_respects_precedence() {
        let user = ConfigLayer {
            retention_days: Some(30),
            user_id: Some(UserId::parse("ada").unwrap()),
            ..ConfigLayer::default()
        };
        let explicit = ConfigLayer {
            retention_days: Some(90),
            ..ConfigLayer::default()
        };

        let config = merge_layers([user, explicit]);
        assert_eq!(config.retention_days, 90);
        assert_eq!(config.user_id, Some(UserId::parse("ada").unwrap()));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = Config::default();
        let ignored = apply_overrides_from(
            &mut config,
            env(&[
                ("CKS_RETENTION_DAYS", " 7 "),
                ("CKS_USER", "grace@example.com"),
                ("CKS_REFERENCE_DATA", "/srv/places.json"),
            ]),
        );
        assert!(ignored.is_empty());
        assert_eq!(config.retention_days, 7);
        assert_eq!(config.user_id, Some(UserId::parse("grace@example.com").unwrap()));
        assert_eq!(
            config.reference_data.as_deref(),
            Some(std::path::Path::new("/srv/places.json"))
        );
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut config = Config::default();
        let ignored = apply_overrides_from(
            &mut config,
            env(&[("CKS_RETENTION_DAYS", "forever"), ("CKS_USER", "a/b")]),
        );
        assert_eq!(config, Config::default());
        let vars: Vec<_> = ignored.iter().map(|note| note.var).collect();
        assert_eq!(vars, vec!["CKS_RETENTION_DAYS", "CKS_USER"]);
        assert!(ignored[0].to_string().contains("forever"));
    }
}
