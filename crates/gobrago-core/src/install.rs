//! Gobra installation configuration.

use serde::{Deserialize, Serialize};

/// Where the Gobra jar and its solver live, and how to launch the JVM.
///
/// Every field defaults to empty. Absent JSON keys keep that default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Path to the Gobra jar. Required at expansion time.
    pub jar_path: String,
    /// Options passed to `java` before `-jar`, in document order.
    pub jvm_options: Vec<String>,
    /// Path to the Z3 executable. Empty means Gobra picks its own.
    pub z3_path: String,
}
