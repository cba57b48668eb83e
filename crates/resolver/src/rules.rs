//! Override Rules
//!
//! Library defaults applied to matched subprojects during resolution:
//! minimum compile SDK enforcement and namespace defaulting. Each rule
//! targets disjoint fields, applies exactly once per subproject, and is
//! idempotent: reapplying yields the same resolved configuration.

use modcfg_core::{ModuleKind, RuleSettings};
use tracing::debug;

use crate::resolve::ResolvedConfig;

/// Defaults injected into library subprojects matched by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDefaults {
    /// Target subproject name
    pub target: String,
    /// Minimum compile SDK to enforce
    pub min_compile_sdk: Option<u32>,
    /// Namespace injected when unset or blank
    pub default_namespace: Option<String>,
}

impl From<&RuleSettings> for LibraryDefaults {
    fn from(rule: &RuleSettings) -> Self {
        Self {
            target: rule.subproject.clone(),
            min_compile_sdk: rule.min_compile_sdk,
            default_namespace: rule.default_namespace.clone(),
        }
    }
}

impl LibraryDefaults {
    /// Whether this rule targets the named subproject
    pub fn matches(&self, name: &str) -> bool {
        self.target == name
    }

    /// Apply the defaults to a resolved configuration draft.
    ///
    /// Only library modules are touched. The SDK and namespace updates are
    /// independent, order-free field updates:
    /// - `compile_sdk` becomes `max(current, min)`, treating unset as lower
    ///   than any minimum
    /// - `namespace` is set only when currently unset or blank
    pub fn apply(&self, config: &mut ResolvedConfig) {
        if config.kind != ModuleKind::Library {
            return;
        }

        if let Some(min) = self.min_compile_sdk {
            match config.compile_sdk {
                Some(current) if current >= min => {}
                _ => {
                    debug!("{}: compile_sdk raised to {}", config.name, min);
                    config.compile_sdk = Some(min);
                }
            }
        }

        if let Some(ns) = &self.default_namespace {
            if config.namespace_is_blank() {
                debug!("{}: namespace defaulted to {}", config.name, ns);
                config.namespace = Some(ns.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn library(name: &str) -> ResolvedConfig {
        ResolvedConfig {
            name: name.to_string(),
            kind: ModuleKind::Library,
            compile_sdk: None,
            namespace: None,
            build_dir: PathBuf::from("/build").join(name),
            overrides: Default::default(),
        }
    }

    fn rule() -> LibraryDefaults {
        LibraryDefaults {
            target: "blue_thermal_printer".to_string(),
            min_compile_sdk: Some(34),
            default_namespace: Some("id.kakzaki.blue_thermal_printer".to_string()),
        }
    }

    #[test]
    fn test_unset_sdk_raised_to_minimum() {
        let mut config = library("blue_thermal_printer");
        rule().apply(&mut config);
        assert_eq!(config.compile_sdk, Some(34));
    }

    #[test]
    fn test_lower_sdk_raised_to_minimum() {
        let mut config = library("blue_thermal_printer");
        config.compile_sdk = Some(30);
        rule().apply(&mut config);
        assert_eq!(config.compile_sdk, Some(34));
    }

    #[test]
    fn test_higher_sdk_kept() {
        let mut config = library("blue_thermal_printer");
        config.compile_sdk = Some(35);
        rule().apply(&mut config);
        assert_eq!(config.compile_sdk, Some(35));
    }

    #[test]
    fn test_blank_namespace_defaulted() {
        let mut config = library("blue_thermal_printer");
        config.namespace = Some("".to_string());
        rule().apply(&mut config);
        assert_eq!(
            config.namespace.as_deref(),
            Some("id.kakzaki.blue_thermal_printer")
        );
    }

    #[test]
    fn test_custom_namespace_kept() {
        let mut config = library("blue_thermal_printer");
        config.namespace = Some("com.custom".to_string());
        rule().apply(&mut config);
        assert_eq!(config.namespace.as_deref(), Some("com.custom"));
    }

    #[test]
    fn test_non_library_untouched() {
        let mut config = library("app");
        config.kind = ModuleKind::Application;
        rule().apply(&mut config);
        assert_eq!(config.compile_sdk, None);
        assert_eq!(config.namespace, None);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut config = library("blue_thermal_printer");
        let rule = rule();
        rule.apply(&mut config);
        let once = config.clone();
        rule.apply(&mut config);
        assert_eq!(config, once);
    }
}
