//! Navigation messages

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One appended route segment with its props
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub selected: String,
    #[serde(default)]
    pub props: BTreeMap<String, String>,
}

impl PathSegment {
    pub fn new(selected: impl Into<String>) -> Self {
        PathSegment {
            selected: selected.into(),
            props: BTreeMap::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteAction {
    /// Switch tabs; `path[0]` is the tab
    SwitchTo { path: Vec<String> },
    /// Replace the full path; `path[0]` is the tab
    NavigateTo { path: Vec<String> },
    /// Push segments onto the selected tab
    NavigateAppend { path: Vec<PathSegment> },
    NavigateUp,
}
