//! Extension records as reported by the package-management collaborator

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language tag that matches every enabled language
pub const ALL_LANGUAGES: &str = "all";

/// One extension in one of its three catalog states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    /// Package identifier, unique within each collection
    pub package_name: String,

    /// Human readable name
    pub display_name: String,

    /// Version string as published
    #[serde(default)]
    pub version_name: String,

    /// Language tag (`"all"` for multi-language extensions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// State-specific data
    #[serde(flatten)]
    pub kind: ExtensionKind,
}

/// State of an extension record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExtensionKind {
    /// Installed on the device
    Installed {
        /// A newer version is available
        #[serde(default)]
        has_update: bool,
        /// No longer published in the available catalog
        #[serde(default)]
        is_obsolete: bool,
    },

    /// Installed but signed with a signature that is not trusted yet
    Untrusted { signature_hash: String },

    /// Published in the catalog and not installed
    Available,
}

impl ExtensionRecord {
    /// Create an installed record
    pub fn installed(package_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(
            package_name,
            display_name,
            ExtensionKind::Installed {
                has_update: false,
                is_obsolete: false,
            },
        )
    }

    /// Create an untrusted record
    pub fn untrusted(
        package_name: impl Into<String>,
        display_name: impl Into<String>,
        signature_hash: impl Into<String>,
    ) -> Self {
        Self::new(
            package_name,
            display_name,
            ExtensionKind::Untrusted {
                signature_hash: signature_hash.into(),
            },
        )
    }

    /// Create an available record for the given language
    pub fn available(
        package_name: impl Into<String>,
        display_name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self::new(package_name, display_name, ExtensionKind::Available)
            .with_language(language)
    }

    fn new(
        package_name: impl Into<String>,
        display_name: impl Into<String>,
        kind: ExtensionKind,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            display_name: display_name.into(),
            version_name: String::new(),
            language: None,
            kind,
        }
    }

    /// Set the language tag
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the version string
    pub fn with_version(mut self, version_name: impl Into<String>) -> Self {
        self.version_name = version_name.into();
        self
    }

    /// Mark an installed record as having an update. No-op for other states.
    pub fn with_update(mut self, value: bool) -> Self {
        if let ExtensionKind::Installed { has_update, .. } = &mut self.kind {
            *has_update = value;
        }
        self
    }

    /// Mark an installed record as obsolete. No-op for other states.
    pub fn with_obsolete(mut self, value: bool) -> Self {
        if let ExtensionKind::Installed { is_obsolete, .. } = &mut self.kind {
            *is_obsolete = value;
        }
        self
    }

    pub fn is_installed(&self) -> bool {
        matches!(self.kind, ExtensionKind::Installed { .. })
    }

    pub fn is_untrusted(&self) -> bool {
        matches!(self.kind, ExtensionKind::Untrusted { .. })
    }

    pub fn is_available(&self) -> bool {
        matches!(self.kind, ExtensionKind::Available)
    }

    pub fn has_update(&self) -> bool {
        matches!(
            self.kind,
            ExtensionKind::Installed {
                has_update: true,
                ..
            }
        )
    }

    pub fn is_obsolete(&self) -> bool {
        matches!(
            self.kind,
            ExtensionKind::Installed {
                is_obsolete: true,
                ..
            }
        )
    }

    /// Signature hash of an untrusted record
    pub fn signature_hash(&self) -> Option<&str> {
        match &self.kind {
            ExtensionKind::Untrusted { signature_hash } => Some(signature_hash),
            _ => None,
        }
    }

    /// Whether this record should be shown for the given enabled languages
    pub fn matches_languages<'a>(&self, mut enabled: impl Iterator<Item = &'a str>) -> bool {
        match self.language.as_deref() {
            Some(ALL_LANGUAGES) => true,
            Some(lang) => enabled.any(|l| l == lang),
            None => false,
        }
    }
}

/// Step of an in-flight install or update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStep {
    Idle,
    Pending,
    Downloading,
    Installing,
    Installed,
    Error,
}

impl InstallStep {
    /// `Installed` or `Error`
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Installed | Self::Error)
    }

    pub fn is_completed(self) -> bool {
        self == Self::Installed
    }
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Downloading => "downloading",
            Self::Installing => "installing",
            Self::Installed => "installed",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_record_serialization() {
        let record = ExtensionRecord::installed("eu.ext.alpha", "Alpha")
            .with_version("1.4.2")
            .with_update(true);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""state":"installed"#));
        assert!(json.contains(r#""has_update":true"#));
        assert!(!json.contains("language"));

        let deserialized: ExtensionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_available_record_from_yaml() {
        let yaml = r#"
package_name: eu.ext.beta
display_name: Beta
language: fr
state: available
"#;
        let record: ExtensionRecord = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(record.is_available());
        assert_eq!(record.language.as_deref(), Some("fr"));
        assert!(record.version_name.is_empty());
    }

    #[test]
    fn test_untrusted_signature_hash() {
        let record = ExtensionRecord::untrusted("eu.ext.gamma", "Gamma", "ab12cd");
        assert_eq!(record.signature_hash(), Some("ab12cd"));
        assert!(!record.has_update());
    }

    #[test]
    fn test_update_flag_ignored_for_available() {
        let record = ExtensionRecord::available("eu.ext.delta", "Delta", "en").with_update(true);
        assert!(!record.has_update());
    }

    #[test]
    fn test_matches_languages() {
        let enabled = ["en", "de"];
        let en = ExtensionRecord::available("a", "A", "en");
        let fr = ExtensionRecord::available("b", "B", "fr");
        let all = ExtensionRecord::available("c", "C", ALL_LANGUAGES);

        assert!(en.matches_languages(enabled.iter().copied()));
        assert!(!fr.matches_languages(enabled.iter().copied()));
        assert!(all.matches_languages(std::iter::empty()));
    }

    #[test]
    fn test_install_step_terminal() {
        assert!(InstallStep::Installed.is_terminal());
        assert!(InstallStep::Error.is_terminal());
        assert!(!InstallStep::Downloading.is_terminal());
        assert!(!InstallStep::Error.is_completed());
    }
}
