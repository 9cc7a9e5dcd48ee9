//! Current navigation position, one path per tab

use std::collections::HashMap;

use crate::messages::PathSegment;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteState {
    pub selected_tab: Option<String>,
    paths: HashMap<String, Vec<String>>,
}

impl RouteState {
    /// Path inside `tab`, starting with the tab itself; empty if never visited
    pub fn path_for(&self, tab: &str) -> &[String] {
        self.paths.get(tab).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_path(&self) -> &[String] {
        match &self.selected_tab {
            Some(tab) => self.path_for(tab),
            None => &[],
        }
    }

    /// Select `path[0]`; a longer path also replaces that tab's stack
    pub fn switch_to(&mut self, path: &[String]) {
        let Some(tab) = path.first() else {
            return;
        };
        self.selected_tab = Some(tab.clone());
        if path.len() > 1 {
            self.paths.insert(tab.clone(), path.to_vec());
        } else {
            self.paths
                .entry(tab.clone())
                .or_insert_with(|| vec![tab.clone()]);
        }
    }

    pub fn navigate_to(&mut self, path: &[String]) {
        let Some(tab) = path.first() else {
            return;
        };
        self.selected_tab = Some(tab.clone());
        self.paths.insert(tab.clone(), path.to_vec());
    }

    pub fn navigate_append(&mut self, segments: &[PathSegment]) {
        let Some(tab) = self.selected_tab.clone() else {
            tracing::warn!("navigate_append without a selected tab");
            return;
        };
        let path = self.paths.entry(tab.clone()).or_insert_with(|| vec![tab]);
        path.extend(segments.iter().map(|s| s.selected.clone()));
    }

    /// Pop the top screen; the tab root stays
    pub fn navigate_up(&mut self) {
        if let Some(tab) = &self.selected_tab {
            if let Some(path) = self.paths.get_mut(tab) {
                if path.len() > 1 {
                    path.pop();
                }
            }
        }
    }
}
