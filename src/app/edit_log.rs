//! In-Process-Notifier: protokolliert übernommene Edit-Gruppen.
//!
//! Wird vom Demo-Binary und von Tests genutzt, wenn kein Host-Backend
//! angeschlossen ist.

use super::transaction::{EditNotifier, WireEdit};
use crate::core::NodeId;

/// Eine abgeschlossene Edit-Gruppe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditGroup {
    pub label: String,
    pub edits: Vec<WireEdit>,
}

/// Speichert übernommene Gruppen und Neuberechnungs-Anforderungen in Reihenfolge.
#[derive(Debug, Default)]
pub struct EditLog {
    groups: Vec<EditGroup>,
    pending: Option<EditGroup>,
    recomputes: Vec<NodeId>,
}

impl EditLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl übernommener Gruppen.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Read-only Sicht auf alle übernommenen Gruppen.
    pub fn groups(&self) -> &[EditGroup] {
        &self.groups
    }

    /// Angeforderte Neuberechnungen in Reihenfolge.
    pub fn recomputes(&self) -> &[NodeId] {
        &self.recomputes
    }
}

impl EditNotifier for EditLog {
    fn begin_group(&mut self, label: &str) {
        if let Some(stale) = self.pending.take() {
            log::warn!("Offene Edit-Gruppe '{}' verworfen", stale.label);
        }
        self.pending = Some(EditGroup {
            label: label.to_string(),
            edits: Vec::new(),
        });
    }

    fn record(&mut self, edit: &WireEdit) {
        match self.pending.as_mut() {
            Some(group) => group.edits.push(*edit),
            None => log::warn!("Edit ohne offene Gruppe ignoriert: {:?}", edit),
        }
    }

    fn commit_group(&mut self) -> anyhow::Result<()> {
        let group = self
            .pending
            .take()
            .ok_or_else(|| anyhow::anyhow!("Keine offene Edit-Gruppe"))?;
        // Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen
        if self.groups.len() >= Self::MAX_ENTRIES {
            self.groups.drain(..Self::MAX_ENTRIES / 2);
        }
        self.groups.push(group);
        Ok(())
    }

    fn abort_group(&mut self) {
        self.pending = None;
    }

    fn request_recompute(&mut self, node: NodeId) {
        self.recomputes.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commits_recorded_groups_in_order() {
        let mut log = EditLog::new();
        log.begin_group("Trennen");
        log.record(&WireEdit::RemoveSource { target: 2, source: 1 });
        log.commit_group().expect("Gruppe offen");
        log.request_recompute(7);

        assert_eq!(log.len(), 1);
        assert_eq!(log.groups()[0].label, "Trennen");
        assert_eq!(log.groups()[0].edits.len(), 1);
        assert_eq!(log.recomputes(), &[7]);
    }

    #[test]
    fn aborted_group_is_dropped() {
        let mut log = EditLog::new();
        log.begin_group("Einfügen");
        log.record(&WireEdit::RemoveAllSources { target: 3 });
        log.abort_group();
        assert!(log.is_empty());
        assert!(log.commit_group().is_err());
    }
}
