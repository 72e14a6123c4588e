use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::HelperConfig;

/// Location information for a violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub row: usize,
    pub column: usize,
}

/// Result of checking a file for a specific rule
/// Each CheckResult represents a single violation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub rule_name: String,
    pub file_path: String,
    pub has_issue: bool,
    pub issue_count: usize,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl CheckResult {
    pub fn issue(
        rule: &dyn Rule,
        file_path: &Path,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            rule_name: rule.name().to_string(),
            file_path: file_path.to_string_lossy().to_string(),
            has_issue: true,
            issue_count: 1,
            message: Some(message.into()),
            location: Some(location),
        }
    }
}

/// Result of converting/fixing a file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResult {
    pub rule_name: String,
    pub file_path: String,
    pub fixes_applied: usize,
    pub message: Option<String>,
}

impl ConvertResult {
    pub fn new(rule: &dyn Rule, file_path: &Path, fixes_applied: usize, message: Option<String>) -> Self {
        Self {
            rule_name: rule.name().to_string(),
            file_path: file_path.to_string_lossy().to_string(),
            fixes_applied,
            message,
        }
    }
}

/// A rule that can check for and fix style layout issues in screen components
pub trait Rule {
    /// The name of this rule (e.g., "themed-styles", "style-references")
    fn name(&self) -> &str;

    /// A short description of what this rule checks/fixes
    fn description(&self) -> &str;

    /// Check if a file violates this rule
    /// Returns a vector of CheckResults, one per violation found
    fn check(&self, file_path: &Path, verbose: bool) -> Result<Vec<CheckResult>>;

    /// Convert/fix rule violations in a file
    /// If in_place is false, returns the converted content as a string in the message field
    fn convert(
        &self,
        file_path: &Path,
        in_place: bool,
        check_mode: bool,
        verbose: bool,
    ) -> Result<ConvertResult>;
}

/// Registry of all available rules
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn Rule + Send + Sync>>,
    order: Vec<String>,
}

impl RuleRegistry {
    /// Create a registry with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&HelperConfig::default())
    }

    /// Create a new registry and register all known rules
    pub fn with_config(config: &HelperConfig) -> Result<Self> {
        let mut registry = Self {
            rules: HashMap::new(),
            order: Vec::new(),
        };

        // The merge must run before references are pointed at the themed object
        registry.register(Arc::new(
            crate::conversions::themed_styles::ThemedStylesConverter::new(config.clone())?,
        ));
        registry.register(Arc::new(
            crate::conversions::style_references::StyleReferencesConverter::new(
                config.references.clone(),
            )?,
        ));

        Ok(registry)
    }

    /// Register a rule
    fn register(&mut self, rule: Arc<dyn Rule + Send + Sync>) {
        let name = rule.name().to_string();
        if self.rules.insert(name.clone(), rule).is_none() {
            self.order.push(name);
        }
    }

    /// Get a rule by name, or return an error if not found
    pub fn get(&self, name: &str) -> Result<Arc<dyn Rule + Send + Sync>> {
        self.rules
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown rule: {}", name))
    }

    /// Get all registered rules, in the order they should run
    pub fn all(&self) -> Vec<Arc<dyn Rule + Send + Sync>> {
        self.order
            .iter()
            .filter_map(|name| self.rules.get(name).cloned())
            .collect()
    }

    /// List all rule names
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.keys().cloned().collect();
        names.sort();
        names
    }
}
