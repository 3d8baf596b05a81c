// 🧩 Neighborhood groups - groups.json
// Group name → member neighborhood names. The map draws a group as one merged
// shape and sums its members' distributions.

use crate::error::{ParseCause, Result, SeedError};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// What the zoomed-out map draws: merged groups plus the leftover neighborhoods
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedView {
    pub groups: Vec<GroupEntry>,
    pub ungrouped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupEntry {
    pub name: String,
    /// Members actually present among the names, in their order
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Groups {
    groups: IndexMap<String, Vec<String>>,
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SeedError::parse(path, e))?;
        let groups: Groups = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SeedError::parse(path, e))?;

        debug!("Loaded {} groups from {}", groups.len(), path.display());
        Ok(groups)
    }

    /// Like `load`, but a missing file means "no groups"
    pub fn load_optional(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(SeedError::Parse { source: ParseCause::Io(e), .. })
                if e.kind() == io::ErrorKind::NotFound =>
            {
                debug!("No groups file at {}", path.display());
                Ok(Groups::new())
            }
            other => other,
        }
    }

    pub fn insert(&mut self, group: impl Into<String>, members: Vec<String>) {
        self.groups.insert(group.into(), members);
    }

    pub fn is_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn members(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(g, m)| (g.as_str(), m.as_slice()))
    }

    /// Names not claimed by any group, in input order
    pub fn ungrouped<'a, I>(&self, names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter(|name| !self.groups.values().any(|members| members.iter().any(|m| m == *name)))
            .collect()
    }

    /// Grouped view over `names`; groups with no present member are left out
    pub fn view<'a, I>(&self, names: I) -> GroupedView
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();

        let groups = self
            .groups
            .iter()
            .filter_map(|(group, members)| {
                let present: Vec<String> = names
                    .iter()
                    .filter(|name| members.iter().any(|m| m == **name))
                    .map(|name| name.to_string())
                    .collect();
                if present.is_empty() {
                    None
                } else {
                    Some(GroupEntry {
                        name: group.clone(),
                        members: present,
                    })
                }
            })
            .collect();

        let ungrouped = self
            .ungrouped(names.iter().copied())
            .into_iter()
            .map(str::to_string)
            .collect();

        GroupedView { groups, ungrouped }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
