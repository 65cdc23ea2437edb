//! Atomare Wire-Änderungen: Edits werden auf einer Arbeitskopie des Graphen
//! gesammelt und erst nach Zustimmung des Hosts übernommen.

use crate::core::{Graph, NodeId, PortId};
use std::sync::Arc;
use thiserror::Error;

/// Eine einzelne Kanten-Änderung, wie sie dem Host gemeldet wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEdit {
    /// Kante `source → target` entfernen
    RemoveSource { target: PortId, source: PortId },
    /// Kante `source → target` anlegen
    AddSource { target: PortId, source: PortId },
    /// Alle Quellen eines Eingangs entfernen
    RemoveAllSources { target: PortId },
}

/// Transaktionaler Edit-Kanal des Hosts (Undo-Aufzeichnung, Neuberechnung).
pub trait EditNotifier {
    /// Öffnet eine benannte Edit-Gruppe.
    fn begin_group(&mut self, label: &str);
    /// Meldet einen Edit der offenen Gruppe.
    fn record(&mut self, edit: &WireEdit);
    /// Schließt die Gruppe ab. Ein Fehler verwirft die komplette Gruppe.
    fn commit_group(&mut self) -> anyhow::Result<()>;
    /// Verwirft die offene Gruppe.
    fn abort_group(&mut self);
    /// Fordert die Neuberechnung ab `node` an.
    fn request_recompute(&mut self, node: NodeId);
}

/// Fachliche Fehler beim Anwenden von Wire-Änderungen.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Port {0} existiert nicht")]
    UnknownPort(PortId),
    #[error("Verbindung {from}→{to} nicht möglich")]
    NotConnectable { from: PortId, to: PortId },
    #[error("Änderung vom Host abgelehnt: {0}")]
    CommitRejected(String),
}

/// Ergebnis eines Commit-Versuchs ohne Fehler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Edits wurden übernommen
    Performed,
    /// Nichts zu tun
    NotPerformed,
}

/// Sammelt Edits auf einer Copy-on-Write-Arbeitskopie.
///
/// Wird die Transaktion verworfen (Drop ohne `commit`), bleibt der Graph
/// des Aufrufers unverändert.
#[derive(Debug)]
pub struct EditTransaction {
    label: String,
    working: Arc<Graph>,
    edits: Vec<WireEdit>,
    recompute: Option<NodeId>,
}

impl EditTransaction {
    /// Startet eine Transaktion auf `graph` (O(1): nur Arc-Klon).
    pub fn begin(graph: &Arc<Graph>, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            working: Arc::clone(graph),
            edits: Vec::new(),
            recompute: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Aktueller Stand der Arbeitskopie.
    pub fn graph(&self) -> &Graph {
        &self.working
    }

    pub fn edits(&self) -> &[WireEdit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    fn ensure_port(&self, port: PortId) -> Result<(), EditError> {
        if self.working.port(port).is_some() {
            Ok(())
        } else {
            Err(EditError::UnknownPort(port))
        }
    }

    /// Entfernt die Kante `source → target`. Fehlende Kante ist kein Fehler.
    pub fn remove_source(&mut self, target: PortId, source: PortId) -> Result<(), EditError> {
        self.ensure_port(target)?;
        self.ensure_port(source)?;
        if !self.working.has_connection(source, target) {
            return Ok(());
        }
        // Erst hier wird der Graph bei Bedarf tief kopiert
        Arc::make_mut(&mut self.working).remove_source(target, source);
        self.edits.push(WireEdit::RemoveSource { target, source });
        Ok(())
    }

    /// Entfernt alle Quellen von `target`.
    pub fn remove_all_sources(&mut self, target: PortId) -> Result<usize, EditError> {
        self.ensure_port(target)?;
        if self.working.sources(target).is_empty() {
            return Ok(0);
        }
        let removed = Arc::make_mut(&mut self.working).remove_all_sources(target);
        self.edits.push(WireEdit::RemoveAllSources { target });
        Ok(removed)
    }

    /// Verbindet `source → target`. Eine bereits bestehende Kante bleibt unverändert.
    pub fn add_source(&mut self, target: PortId, source: PortId) -> Result<(), EditError> {
        self.ensure_port(target)?;
        self.ensure_port(source)?;
        if self.working.has_connection(source, target) {
            return Ok(());
        }
        let connectable = source != target
            && self.working.port(target).is_some_and(|p| p.has_input_grip())
            && self.working.port(source).is_some_and(|p| p.has_output_grip());
        if !connectable || !Arc::make_mut(&mut self.working).add_source(target, source) {
            return Err(EditError::NotConnectable {
                from: source,
                to: target,
            });
        }
        self.edits.push(WireEdit::AddSource { target, source });
        Ok(())
    }

    /// Merkt die Neuberechnung ab `node` vor (genau ein Signal pro Commit).
    pub fn schedule_recompute(&mut self, node: NodeId) {
        self.recompute = Some(node);
    }

    /// Übergibt die Edits als eine Gruppe an den Host und tauscht bei
    /// Erfolg den Graphen aus.
    ///
    /// Lehnt der Host ab, wird die Gruppe abgebrochen und `graph` bleibt
    /// unverändert.
    pub fn commit(
        self,
        graph: &mut Arc<Graph>,
        notifier: &mut dyn EditNotifier,
    ) -> Result<CommitOutcome, EditError> {
        if self.edits.is_empty() {
            return Ok(CommitOutcome::NotPerformed);
        }

        notifier.begin_group(&self.label);
        for edit in &self.edits {
            notifier.record(edit);
        }
        if let Err(e) = notifier.commit_group() {
            notifier.abort_group();
            log::warn!("Edit-Gruppe '{}' abgelehnt: {:#}", self.label, e);
            return Err(EditError::CommitRejected(e.to_string()));
        }

        *graph = self.working;
        if let Some(node) = self.recompute {
            notifier.request_recompute(node);
        }
        log::debug!(
            "Edit-Gruppe '{}' übernommen ({} Änderungen)",
            self.label,
            self.edits.len()
        );
        Ok(CommitOutcome::Performed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Port, PortDirection, Rect};
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        groups: Vec<String>,
        edits: Vec<WireEdit>,
        recomputes: Vec<NodeId>,
        aborted: usize,
        reject: bool,
    }

    impl EditNotifier for Recorder {
        fn begin_group(&mut self, label: &str) {
            self.groups.push(label.to_string());
        }
        fn record(&mut self, edit: &WireEdit) {
            self.edits.push(*edit);
        }
        fn commit_group(&mut self) -> anyhow::Result<()> {
            if self.reject {
                anyhow::bail!("Dokument gesperrt");
            }
            Ok(())
        }
        fn abort_group(&mut self) {
            self.aborted += 1;
        }
        fn request_recompute(&mut self, node: NodeId) {
            self.recomputes.push(node);
        }
    }

    fn graph() -> Arc<Graph> {
        let mut graph = Graph::new();
        let bounds = Rect::from_corners(Vec2::ZERO, Vec2::splat(10.0));
        graph.add_component(
            1,
            "A",
            bounds,
            vec![Port::new(11, 0, PortDirection::Output, "Number", Vec2::ZERO)],
        );
        graph.add_component(
            2,
            "B",
            bounds,
            vec![Port::new(21, 0, PortDirection::Input, "Number", Vec2::new(100.0, 0.0))],
        );
        graph.add_source(21, 11);
        Arc::new(graph)
    }

    #[test]
    fn staged_edits_do_not_touch_original() {
        let original = graph();
        let mut tx = EditTransaction::begin(&original, "Trennen");
        tx.remove_source(21, 11).expect("Ports existieren");
        assert!(!tx.graph().has_connection(11, 21));
        assert!(original.has_connection(11, 21));
        drop(tx);
        assert!(original.has_connection(11, 21));
    }

    #[test]
    fn commit_swaps_graph_and_signals_once() {
        let mut current = graph();
        let mut notifier = Recorder::default();
        let mut tx = EditTransaction::begin(&current, "Trennen");
        tx.remove_source(21, 11).expect("Ports existieren");
        tx.schedule_recompute(2);

        let outcome = tx.commit(&mut current, &mut notifier);
        assert_eq!(outcome, Ok(CommitOutcome::Performed));
        assert!(!current.has_connection(11, 21));
        assert_eq!(notifier.groups, vec!["Trennen".to_string()]);
        assert_eq!(notifier.edits, vec![WireEdit::RemoveSource { target: 21, source: 11 }]);
        assert_eq!(notifier.recomputes, vec![2]);
    }

    #[test]
    fn rejected_commit_leaves_graph_untouched() {
        let mut current = graph();
        let before = Arc::clone(&current);
        let mut notifier = Recorder {
            reject: true,
            ..Recorder::default()
        };
        let mut tx = EditTransaction::begin(&current, "Trennen");
        tx.remove_source(21, 11).expect("Ports existieren");
        tx.schedule_recompute(2);

        let outcome = tx.commit(&mut current, &mut notifier);
        assert!(matches!(outcome, Err(EditError::CommitRejected(_))));
        assert!(Arc::ptr_eq(&current, &before));
        assert!(current.has_connection(11, 21));
        assert_eq!(notifier.aborted, 1);
        assert!(notifier.recomputes.is_empty());
    }

    #[test]
    fn empty_transaction_is_not_performed() {
        let mut current = graph();
        let mut notifier = Recorder::default();
        let tx = EditTransaction::begin(&current, "Leer");
        assert_eq!(tx.commit(&mut current, &mut notifier), Ok(CommitOutcome::NotPerformed));
        assert!(notifier.groups.is_empty());
    }

    #[test]
    fn invalid_edits_are_reported() {
        let current = graph();
        let mut tx = EditTransaction::begin(&current, "Ungültig");
        assert_eq!(tx.add_source(99, 11), Err(EditError::UnknownPort(99)));
        // Eingang als Quelle: kein Output-Grip
        assert_eq!(
            tx.add_source(11, 21),
            Err(EditError::NotConnectable { from: 21, to: 11 })
        );
        // Bestehende Kante ist kein Edit
        tx.add_source(21, 11).expect("bereits verbunden");
        assert!(tx.is_empty());
        // Arbeitskopie wurde nie mutiert und teilt sich noch den Speicher
        assert!(std::ptr::eq(tx.graph(), current.as_ref()));
    }
}
