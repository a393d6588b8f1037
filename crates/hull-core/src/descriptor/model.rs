use serde::{Deserialize, Serialize};

use crate::graph::{LoadingRule, ModuleName};

/// A `<content>` entry of a descriptor: module name plus loading rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: ModuleName,
    #[serde(default)]
    pub loading: LoadingRule,
}

/// Dependency declarations of a single descriptor file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorDependencies {
    /// Content modules this descriptor depends on.
    #[serde(default)]
    pub modules: Vec<ModuleName>,
    /// Plugin ids this descriptor depends on.
    #[serde(default)]
    pub plugins: Vec<String>,
}

/// The parsed shape of one descriptor file, wire format already stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDescriptor {
    /// Declared content modules with loading rules.
    #[serde(default)]
    pub content: Vec<ContentEntry>,
    /// Module and plugin dependencies.
    #[serde(default)]
    pub dependencies: DescriptorDependencies,
    /// Plugin aliases this descriptor declares.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Paths of descriptor fragments included by this file.
    #[serde(default)]
    pub includes: Vec<String>,
}

/// What a test descriptor module's own descriptor file declares.
///
/// Returned by the descriptor side channel for `*._test` modules; the
/// resolver treats these as scope-less dependency edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestDescriptor {
    pub module_dependencies: Vec<ModuleName>,
}

impl TestDescriptor {
    pub fn new<I, S>(module_dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ModuleName>,
    {
        Self {
            module_dependencies: module_dependencies.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&ParsedDescriptor> for TestDescriptor {
    fn from(parsed: &ParsedDescriptor) -> Self {
        Self {
            module_dependencies: parsed.dependencies.modules.clone(),
        }
    }
}
