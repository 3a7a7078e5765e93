//! Folding source records into the merged settings table.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::source::{ConfigRecord, ConfigSource, SourceId};
use crate::{SettingsError, SettingsResult};

/// Final value of one key together with the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntry {
    value: String,
    origin: SourceId,
}

impl MergedEntry {
    /// Raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Source that supplied the value. When several sources agree this is
    /// the last of them.
    #[must_use]
    pub const fn origin(&self) -> &SourceId {
        &self.origin
    }
}

/// Immutable key → value table produced by merging every source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTable {
    entries: BTreeMap<String, MergedEntry>,
}

impl MergedTable {
    /// Raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(MergedEntry::value)
    }

    /// Value and provenance for `key`.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&MergedEntry> {
        self.entries.get(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MergedEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn fold(
        &mut self,
        origin: &SourceId,
        records: Vec<ConfigRecord>,
        strict: bool,
        conflicts: &mut Vec<SettingsError>,
    ) {
        for ConfigRecord { key, value } in records {
            match self.entries.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(MergedEntry {
                        value,
                        origin: origin.clone(),
                    });
                }
                Entry::Occupied(mut slot) => {
                    let existing = slot.get();
                    if existing.value != value {
                        if strict {
                            conflicts.push(SettingsError::Conflict {
                                key: slot.key().clone(),
                                existing: existing.value.clone(),
                                incoming: value,
                                first_source: existing.origin.clone(),
                                second_source: origin.clone(),
                            });
                            continue;
                        }
                        trace!(key = %slot.key(), source = %origin, "later source overrides value");
                    }
                    slot.insert(MergedEntry {
                        value,
                        origin: origin.clone(),
                    });
                }
            }
        }
    }
}

/// Merge `sources` in order into a new table.
///
/// Absent sources are skipped. With `strict` set, a key given different
/// values by two sources is a conflict; every conflict is collected and the
/// merge fails once all sources are folded. Without it the later value wins.
///
/// # Errors
///
/// Returns [`SettingsError::MalformedSource`] as soon as a source fails to
/// parse, and [`SettingsError::Conflict`] (or an aggregate of conflicts) when
/// strict merging finds disagreeing values.
pub(crate) fn merge_sources<'a, I>(sources: I, strict: bool) -> SettingsResult<MergedTable>
where
    I: IntoIterator<Item = &'a ConfigSource>,
{
    let mut table = MergedTable::default();
    let mut conflicts = Vec::new();
    let mut merged_sources = 0_usize;
    for source in sources {
        let Some(records) = source.load()? else {
            continue;
        };
        debug!(source = %source.id(), records = records.len(), "merging source");
        table.fold(source.id(), records, strict, &mut conflicts);
        merged_sources += 1;
    }
    if let Some(err) = SettingsError::try_aggregate(conflicts) {
        return Err(Arc::new(err));
    }
    debug!(sources = merged_sources, keys = table.len(), "settings merged");
    Ok(table)
}
