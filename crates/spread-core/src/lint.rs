//! Lint diagnostics for spread layouts.
//!
//! Reports structural issues without modifying the layout. Hosts use the
//! results to warn before saving or to disable controls; the canvas itself
//! never refuses to operate on a layout that has findings.

use crate::id::PositionId;
use crate::model::{PositionStore, SpreadLayout};
use crate::config::MAX_Z;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Violates a layout invariant.
    Warning,
    /// Tolerated, but worth tidying.
    Info,
}

/// A single lint diagnostic.
#[derive(Debug, Clone)]
pub struct LayoutDiagnostic {
    /// The position this refers to; `None` for whole-layout findings.
    pub position: Option<(usize, PositionId)>,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "out-of-bounds", "off-grid").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules over the layout and return diagnostics.
#[must_use]
pub fn lint_layout(layout: &SpreadLayout) -> Vec<LayoutDiagnostic> {
    let mut diags = Vec::new();
    lint_count(layout, &mut diags);
    lint_bounds(layout, &mut diags);
    lint_grid(layout, &mut diags);
    lint_layers(layout, &mut diags);
    lint_duplicate_ids(layout, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn lint_count(layout: &SpreadLayout, diags: &mut Vec<LayoutDiagnostic>) {
    let len = layout.len();
    let max = layout.config().max_positions;
    if len == 0 || len > max {
        diags.push(LayoutDiagnostic {
            position: None,
            message: format!("A spread needs between 1 and {max} positions, found {len}."),
            severity: LintSeverity::Warning,
            rule: "position-count",
        });
    }
}

fn lint_bounds(layout: &SpreadLayout, diags: &mut Vec<LayoutDiagnostic>) {
    let config = layout.config();
    for (i, pos) in layout.positions().iter().enumerate() {
        if !config.in_bounds(pos.x, pos.y) {
            diags.push(LayoutDiagnostic {
                position: Some((i, pos.id)),
                message: format!(
                    "`{}` at ({}, {}) is outside [0, {}] × [0, {}].",
                    pos.name,
                    pos.x,
                    pos.y,
                    config.max_x(),
                    config.max_y()
                ),
                severity: LintSeverity::Warning,
                rule: "out-of-bounds",
            });
        }
    }
}

/// Off-grid values can legitimately appear at commit boundaries.
fn lint_grid(layout: &SpreadLayout, diags: &mut Vec<LayoutDiagnostic>) {
    let config = layout.config();
    for (i, pos) in layout.positions().iter().enumerate() {
        if !config.on_grid(pos.x, pos.y) {
            diags.push(LayoutDiagnostic {
                position: Some((i, pos.id)),
                message: format!(
                    "`{}` at ({}, {}) is not on the {}-unit grid.",
                    pos.name, pos.x, pos.y, config.grid
                ),
                severity: LintSeverity::Info,
                rule: "off-grid",
            });
        }
    }
}

fn lint_layers(layout: &SpreadLayout, diags: &mut Vec<LayoutDiagnostic>) {
    for (i, pos) in layout.positions().iter().enumerate() {
        if pos.z > MAX_Z {
            diags.push(LayoutDiagnostic {
                position: Some((i, pos.id)),
                message: format!("`{}` has layer {} (max {MAX_Z}).", pos.name, pos.z),
                severity: LintSeverity::Warning,
                rule: "layer-range",
            });
        }
    }
}

fn lint_duplicate_ids(layout: &SpreadLayout, diags: &mut Vec<LayoutDiagnostic>) {
    let mut seen = HashSet::new();
    for (i, pos) in layout.positions().iter().enumerate() {
        if !seen.insert(pos.id) {
            diags.push(LayoutDiagnostic {
                position: Some((i, pos.id)),
                message: format!("Duplicate id `{}`; selection and drag state key on it.", pos.id),
                severity: LintSeverity::Warning,
                rule: "duplicate-id",
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::model::Position;

    fn rules(diags: &[LayoutDiagnostic]) -> Vec<&'static str> {
        diags.iter().map(|d| d.rule).collect()
    }

    #[test]
    fn clean_layout_has_no_findings() {
        let mut layout = SpreadLayout::new(CanvasConfig::default());
        layout.add_default();
        layout.add_default();
        assert!(lint_layout(&layout).is_empty());
    }

    #[test]
    fn empty_layout_is_flagged() {
        let layout = SpreadLayout::new(CanvasConfig::default());
        assert_eq!(rules(&lint_layout(&layout)), vec!["position-count"]);
    }

    #[test]
    fn reports_bounds_grid_layer_and_duplicates() {
        let dup = PositionId::intern("lint_dup");
        let mut wild = Position::new(PositionId::intern("lint_wild"), "Wild", 1420, 7);
        wild.z = 120;
        let positions = vec![
            Position::new(dup, "A", 0, 0),
            Position::new(dup, "B", 15, 0),
            wild,
        ];
        let layout = SpreadLayout::from_positions(positions, CanvasConfig::default());
        let found = rules(&lint_layout(&layout));
        assert!(found.contains(&"out-of-bounds"));
        assert!(found.contains(&"off-grid"));
        assert!(found.contains(&"layer-range"));
        assert!(found.contains(&"duplicate-id"));
    }
}
