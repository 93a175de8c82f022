use serde::{Deserialize, Serialize};

/// A stored shortcut: a unique name pointing at a URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

impl Link {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

/// The segment before the first `-` in a link name.
///
/// Names without a dash (or with nothing before it, like `-wiki`) carry no
/// group prefix and bucket under the shared fallback group.
pub fn group_prefix(name: &str) -> Option<&str> {
    name.split_once('-').map(|(prefix, _)| prefix).filter(|prefix| !prefix.is_empty())
}
