//! Zentrale Konfiguration der Wire-Tools.
//!
//! `WireToolsOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Sichtbarkeit ────────────────────────────────────────────────────

/// Unterhalb dieses Abstands (Canvas-Einheiten, je Achse) gilt ein Wire als entartet.
pub const DEGENERATE_WIRE_EXTENT: f32 = 2.0;
/// Minimale Ausdehnung eines Wires in Screen-Pixeln, damit er gezeichnet wird.
pub const MIN_SCREEN_EXTENT_PX: f32 = 8.0;
/// Vergrößerung des sichtbaren Bereichs (X, Y) für die Endpunkt-Heuristik.
pub const VIEWPORT_MARGIN: [f32; 2] = [100.0, 10.0];

// ── Hit-Tests ───────────────────────────────────────────────────────

/// Standard-Pick-Radius für Punkt-Abfragen auf Wires.
pub const WIRE_PICK_RADIUS: f32 = 5.0;
/// Maximaler Abstand, ab dem sich zwei Kurven berühren.
pub const CURVE_TOUCH_TOLERANCE: f32 = 5.0;
/// Anzahl Stützpunkte für Umriss-Polygone.
pub const OUTLINE_SAMPLES: usize = 50;

// ── Knife ───────────────────────────────────────────────────────────

/// Minimaler Abstand zwischen zwei aufeinanderfolgenden Spur-Samples.
pub const STROKE_SAMPLE_SPACING: f32 = 2.0;
/// Intervall des Decay-Ticks in Millisekunden.
pub const DECAY_INTERVAL_MS: u64 = 10;
/// Anzahl Ticks, bevor die Spur zu schrumpfen beginnt.
pub const DECAY_PATIENCE_TICKS: u32 = 5;
/// Anzahl ältester Samples, die pro Tick entfernt werden.
pub const DECAY_TRIM_PER_TICK: usize = 10;
/// Taste, mit der das Messer gezogen wird.
pub const KNIFE_KEY: char = 'k';

// ── Auto-Wire ───────────────────────────────────────────────────────

/// Breite des Umrisses, mit dem ein gezogenes Objekt einen Wire treffen muss.
pub const SPLICE_OUTLINE_WIDTH: f32 = 2.0;

// ── Wire-Rendering ──────────────────────────────────────────────────

/// Strichstärke für Einzel-Items.
pub const WIRE_WIDTH_ITEM: f32 = 3.0;
/// Strichstärke für Listen.
pub const WIRE_WIDTH_LIST: f32 = 1.0;
/// Strichstärke für Daten-Bäume.
pub const WIRE_WIDTH_TREE: f32 = 1.5;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `wire_tools.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireToolsOptions {
    // ── Sichtbarkeit ────────────────────────────────────────────
    /// Schwelle für entartete Wires (Canvas-Einheiten)
    pub degenerate_wire_extent: f32,
    /// Minimale Bildschirm-Ausdehnung (Pixel)
    pub min_screen_extent_px: f32,
    /// Rand um den sichtbaren Bereich (X, Y)
    pub viewport_margin: [f32; 2],

    // ── Hit-Tests ───────────────────────────────────────────────
    /// Pick-Radius für Punkt-Abfragen
    pub wire_pick_radius: f32,
    /// Berührungs-Toleranz Kurve/Kurve
    pub curve_touch_tolerance: f32,
    /// Stützpunkte für Umriss-Polygone
    pub outline_samples: usize,

    // ── Knife ───────────────────────────────────────────────────
    /// Minimaler Sample-Abstand
    pub stroke_sample_spacing: f32,
    /// Decay-Intervall (ms)
    pub decay_interval_ms: u64,
    /// Geduld in Ticks vor dem Schrumpfen
    pub decay_patience_ticks: u32,
    /// Entfernte Samples pro Tick
    pub decay_trim_per_tick: usize,
    /// Taste für das Messer
    pub knife_key: char,

    // ── Auto-Wire ───────────────────────────────────────────────
    /// Auto-Wire beim Ziehen mit gedrückter Ctrl-Taste aktiv
    #[serde(default = "default_auto_wire_enabled")]
    pub auto_wire_enabled: bool,
    /// Umriss-Breite für den Splice-Treffer
    pub splice_outline_width: f32,

    // ── Wire-Rendering ──────────────────────────────────────────
    /// Strichstärke Item
    pub wire_width_item: f32,
    /// Strichstärke Liste
    pub wire_width_list: f32,
    /// Strichstärke Baum
    pub wire_width_tree: f32,
}

impl Default for WireToolsOptions {
    fn default() -> Self {
        Self {
            degenerate_wire_extent: DEGENERATE_WIRE_EXTENT,
            min_screen_extent_px: MIN_SCREEN_EXTENT_PX,
            viewport_margin: VIEWPORT_MARGIN,

            wire_pick_radius: WIRE_PICK_RADIUS,
            curve_touch_tolerance: CURVE_TOUCH_TOLERANCE,
            outline_samples: OUTLINE_SAMPLES,

            stroke_sample_spacing: STROKE_SAMPLE_SPACING,
            decay_interval_ms: DECAY_INTERVAL_MS,
            decay_patience_ticks: DECAY_PATIENCE_TICKS,
            decay_trim_per_tick: DECAY_TRIM_PER_TICK,
            knife_key: KNIFE_KEY,

            auto_wire_enabled: true,
            splice_outline_width: SPLICE_OUTLINE_WIDTH,

            wire_width_item: WIRE_WIDTH_ITEM,
            wire_width_list: WIRE_WIDTH_LIST,
            wire_width_tree: WIRE_WIDTH_TREE,
        }
    }
}

/// Serde-Default für `auto_wire_enabled` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_auto_wire_enabled() -> bool {
    true
}

impl WireToolsOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("wire_tools"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("wire_tools.toml")
    }

    /// Strichstärke für eine Darstellungsklasse (`None` = nicht zeichnen).
    pub fn wire_width(&self, wire_type: crate::core::WireType) -> Option<f32> {
        use crate::core::WireType;
        match wire_type {
            WireType::Null => None,
            WireType::Item => Some(self.wire_width_item),
            WireType::List => Some(self.wire_width_list),
            WireType::Tree => Some(self.wire_width_tree),
        }
    }

    /// Decay-Intervall als `Duration`.
    pub fn decay_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.decay_interval_ms.max(1))
    }
}
