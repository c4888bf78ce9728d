//! The caller's facet selections.
//!
//! A facet appears in the selection only while at least one of its values
//! is selected. Deselecting the last value removes the facet entirely, so
//! "no constraint" has exactly one representation.

use std::collections::{BTreeMap, BTreeSet};

use job_data::Facet;

use crate::error::{QueryError, Result};

/// Active facet values plus the optional free-text location constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    facets: BTreeMap<Facet, BTreeSet<String>>,
    location: Option<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`select`](Self::select) for several values at once.
    pub fn with<I, S>(mut self, facet: Facet, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.select(facet, id.as_ref())?;
        }
        Ok(self)
    }

    /// Build a selection from facet keys as they appear on the wire
    /// (`"category"`, `"experienceLevel"`, `"jobType"`, `"locationType"`).
    pub fn from_keyed<K, I, S>(pairs: impl IntoIterator<Item = (K, I)>) -> Result<Self>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for (key, ids) in pairs {
            let key = key.as_ref();
            let facet: Facet = key
                .parse()
                .map_err(|_| QueryError::UnknownFacet(key.to_string()))?;
            selection = selection.with(facet, ids)?;
        }
        Ok(selection)
    }

    /// Builder form of [`set_location`](Self::set_location).
    pub fn with_location(mut self, location: &str) -> Self {
        self.set_location(location);
        self
    }

    /// True when no facet and no location constraint is active.
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty() && self.location.is_none()
    }

    /// Add `id` to the facet's selected set.
    ///
    /// The id is matched against the facet's catalog ignoring ASCII case and
    /// stored in its canonical form.
    pub fn select(&mut self, facet: Facet, id: &str) -> Result<()> {
        let id = canonical_id(facet, id)?;
        self.facets.entry(facet).or_default().insert(id.to_string());
        Ok(())
    }

    /// Remove `id` from the facet's selected set. Returns whether it was
    /// selected.
    pub fn deselect(&mut self, facet: Facet, id: &str) -> bool {
        let Ok(id) = canonical_id(facet, id) else {
            return false;
        };
        let Some(values) = self.facets.get_mut(&facet) else {
            return false;
        };
        let removed = values.remove(id);
        if values.is_empty() {
            self.facets.remove(&facet);
        }
        removed
    }

    /// Flip `id` in the facet's selected set. Returns `true` if the value is
    /// selected afterwards.
    pub fn toggle(&mut self, facet: Facet, id: &str) -> Result<bool> {
        let id = canonical_id(facet, id)?;
        if self.deselect(facet, id) {
            Ok(false)
        } else {
            self.select(facet, id)?;
            Ok(true)
        }
    }

    /// Selected values for a facet, `None` when the facet is unconstrained.
    pub fn values(&self, facet: Facet) -> Option<&BTreeSet<String>> {
        self.facets.get(&facet)
    }

    pub fn is_selected(&self, facet: Facet, id: &str) -> bool {
        self.values(facet).is_some_and(|values| values.contains(id))
    }

    /// Constrained facets in picker order.
    pub fn active_facets(&self) -> impl Iterator<Item = (Facet, &BTreeSet<String>)> {
        self.facets.iter().map(|(facet, values)| (*facet, values))
    }

    /// Set the location constraint. Blank text clears it; anything else is
    /// kept exactly as typed, surrounding spaces included.
    pub fn set_location(&mut self, location: &str) {
        self.location = if location.trim().is_empty() {
            None
        } else {
            Some(location.to_string())
        };
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn clear(&mut self) {
        self.facets.clear();
        self.location = None;
    }
}

fn canonical_id(facet: Facet, id: &str) -> Result<&'static str> {
    let wanted = id.trim();
    facet
        .catalog()
        .iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(wanted))
        .map(|entry| entry.id)
        .ok_or_else(|| QueryError::UnknownTag {
            facet,
            value: id.to_string(),
        })
}
