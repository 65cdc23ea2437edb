//! Gesten-Phasen als reine Zustandsmaschine.
//!
//! Jede Geste (Knife, AutoWire) durchläuft dieselben Phasen; die Übergänge
//! sind reine Funktionen und damit ohne Host testbar.

/// Phase einer Geste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// Nicht aktiv
    #[default]
    Idle,
    /// Aktivierungs-Taste gehalten, noch keine Bewegung
    Armed,
    /// Geste läuft (Pointer gedrückt bzw. Drag aktiv)
    Active,
    /// Abgebrochen (Fokusverlust, Taste losgelassen, Commit abgelehnt)
    Cancelled,
    /// Mindestens eine Änderung wurde übernommen
    Committed,
}

/// Auslöser eines Phasen-Übergangs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// Aktivierungs-Taste gedrückt
    Arm,
    /// Aktivierungs-Taste losgelassen
    Disarm,
    /// Pointer gedrückt / Drag begonnen
    Begin,
    /// Neues Sample ohne Änderung
    Sample,
    /// Änderung übernommen (Schnitt oder Splice)
    Commit,
    /// Pointer losgelassen / Drag beendet
    End,
    /// Fokusverlust des Canvas
    FocusLost,
    /// Übernahme vom Host abgelehnt
    Abort,
    /// Abgebrochene Geste aufräumen
    Settle,
}

impl GesturePhase {
    /// Folgephase für `event`. Nicht definierte Kombinationen lassen die Phase unverändert.
    pub fn next(self, event: GestureEvent) -> GesturePhase {
        use GestureEvent as E;
        use GesturePhase as P;
        match (self, event) {
            (P::Idle, E::Arm) => P::Armed,
            (P::Armed, E::Begin) => P::Active,
            (P::Active | P::Committed, E::Commit) => P::Committed,
            (P::Committed, E::Sample) => P::Active,
            (P::Active | P::Committed, E::End) => P::Armed,
            (P::Armed, E::Disarm) => P::Idle,
            (P::Active | P::Committed, E::Disarm | E::Abort) => P::Cancelled,
            (P::Armed | P::Active | P::Committed, E::FocusLost) => P::Cancelled,
            (P::Cancelled, E::Settle) => P::Idle,
            (phase, _) => phase,
        }
    }

    /// Läuft gerade eine Bewegung (Pointer gedrückt / Drag)?
    pub fn is_engaged(self) -> bool {
        matches!(self, GesturePhase::Active | GesturePhase::Committed)
    }

    /// Ist die Geste in irgendeiner Form aktiv?
    pub fn is_live(self) -> bool {
        !matches!(self, GesturePhase::Idle | GesturePhase::Cancelled)
    }
}
