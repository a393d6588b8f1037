use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Reserved suffix marking a content module as a test descriptor module.
///
/// A module named `some.module._test` carries test-only content for the base
/// module `some.module`; its build target is the base module's target.
pub const TEST_DESCRIPTOR_SUFFIX: &str = "._test";

/// Interned name of a content module.
///
/// Cloning is cheap (shared `Arc<str>`), which matters because the resolver
/// keys three maps and a queue by name. Two notations are recognized:
///
/// - *Slash notation* (`parentPlugin/child`) denotes a virtual module that
///   has no build target of its own.
/// - The [`TEST_DESCRIPTOR_SUFFIX`] marks a test descriptor module whose
///   base name is obtained by stripping the suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleName(Arc<str>);

impl ModuleName {
    /// Create a module name from any string-like value.
    pub fn new(name: impl AsRef<str>) -> Self {
        ModuleName(Arc::from(name.as_ref()))
    }

    /// The raw name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a slash-notation virtual module (`plugin/child`).
    pub fn is_slash_notation(&self) -> bool {
        self.0.contains('/')
    }

    /// Whether this is a test descriptor module (`*._test`).
    pub fn is_test_descriptor(&self) -> bool {
        self.0.ends_with(TEST_DESCRIPTOR_SUFFIX)
    }

    /// The name with the test-descriptor suffix stripped, if present.
    pub fn base_name(&self) -> &str {
        self.0
            .strip_suffix(TEST_DESCRIPTOR_SUFFIX)
            .unwrap_or(&self.0)
    }

    /// The build target this module compiles from, if any.
    ///
    /// Slash-notation modules have no target of their own. Test descriptor
    /// modules share the base module's target. Every other module's target
    /// is the module name itself.
    pub fn target_name(&self) -> Option<&str> {
        if self.is_slash_notation() {
            None
        } else if self.is_test_descriptor() {
            Some(self.base_name())
        } else {
            Some(&self.0)
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleName {
    fn from(name: &str) -> Self {
        ModuleName::new(name)
    }
}

impl From<String> for ModuleName {
    fn from(name: String) -> Self {
        ModuleName::new(name)
    }
}

// Allows `HashMap<ModuleName, _>` / `HashSet<ModuleName>` lookups by `&str`.
impl Borrow<str> for ModuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ModuleName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ModuleName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ModuleName::from)
    }
}
