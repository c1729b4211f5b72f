//! Verification job configuration.
//!
//! A job describes what a single Gobra run checks and how. Enum-valued
//! options are stored as `Option`s: `None` means the option is unset and,
//! except for [`MceMode`], is left out of the invocation. Tags Gobra adds
//! later decode into the `Other` variant and are passed through unchanged.

use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize};

/// Viper backend used to discharge proof obligations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(from = "String", into = "String")]
pub enum ViperBackend {
    #[display("SILICON")]
    Silicon,
    #[display("CARBON")]
    Carbon,
    #[display("VSWITHSILICON")]
    SiliconViperServer,
    #[display("VSWITHCARBON")]
    CarbonViperServer,
    #[display("{_0}")]
    Other(String),
}

impl From<String> for ViperBackend {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "SILICON" => Self::Silicon,
            "CARBON" => Self::Carbon,
            "VSWITHSILICON" => Self::SiliconViperServer,
            "VSWITHCARBON" => Self::CarbonViperServer,
            _ => Self::Other(tag),
        }
    }
}

impl From<ViperBackend> for String {
    fn from(backend: ViperBackend) -> Self {
        backend.to_string()
    }
}

/// Most-complete-exploration mode of the symbolic execution backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(from = "String", into = "String")]
pub enum MceMode {
    #[display("on")]
    On,
    /// On demand.
    #[display("od")]
    Od,
    #[display("off")]
    Off,
    #[display("{_0}")]
    Other(String),
}

impl From<String> for MceMode {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "on" => Self::On,
            "od" => Self::Od,
            "off" => Self::Off,
            _ => Self::Other(tag),
        }
    }
}

impl From<MceMode> for String {
    fn from(mode: MceMode) -> Self {
        mode.to_string()
    }
}

/// How aggressively branches are joined during verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(from = "String", into = "String")]
pub enum MoreJoins {
    #[display("all")]
    All,
    #[display("impure")]
    Impure,
    #[display("off")]
    Off,
    #[display("{_0}")]
    Other(String),
}

impl From<String> for MoreJoins {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "all" => Self::All,
            "impure" => Self::Impure,
            "off" => Self::Off,
            _ => Self::Other(tag),
        }
    }
}

impl From<MoreJoins> for String {
    fn from(joins: MoreJoins) -> Self {
        joins.to_string()
    }
}

/// Options for one verification run.
///
/// `Default` yields the recommended baseline, not an all-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub assume_injectivity_inhale: bool,
    #[serde(deserialize_with = "empty_tag_as_none")]
    pub backend: Option<ViperBackend>,
    pub check_consistency: bool,
    #[serde(rename = "overflow")]
    pub check_overflow: bool,
    pub conditionalize_permissions: bool,
    /// Only verify files carrying the `// +gobra` header.
    #[serde(rename = "only_files_with_header")]
    pub header_only: bool,
    #[serde(rename = "includes")]
    pub include_paths: Vec<String>,
    #[serde(rename = "input_files")]
    pub input_file_paths: Vec<String>,
    #[serde(deserialize_with = "empty_tag_as_none")]
    pub mce_mode: Option<MceMode>,
    pub module: String,
    #[serde(deserialize_with = "empty_tag_as_none")]
    pub more_joins: Option<MoreJoins>,
    #[serde(rename = "pkg_path")]
    pub package_path: String,
    pub parallelize_branches: bool,
    pub print_vpr: bool,
    pub project_root: String,
    pub recursive: bool,
    pub require_triggers: bool,
    /// Passed through to Gobra verbatim, after every other flag.
    #[serde(rename = "other")]
    pub other_flags: Vec<String>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            assume_injectivity_inhale: true,
            backend: Some(ViperBackend::Silicon),
            check_consistency: true,
            check_overflow: false,
            conditionalize_permissions: false,
            header_only: true,
            include_paths: Vec::new(),
            input_file_paths: Vec::new(),
            mce_mode: Some(MceMode::Od),
            module: String::new(),
            more_joins: None,
            package_path: String::new(),
            parallelize_branches: false,
            print_vpr: false,
            project_root: String::new(),
            recursive: false,
            require_triggers: true,
            other_flags: Vec::new(),
        }
    }
}

/// Decode an enum tag, treating `null` and `""` as unset.
fn empty_tag_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.filter(|tag| !tag.is_empty()).map(T::from))
}
