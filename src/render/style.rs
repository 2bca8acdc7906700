use crate::prelude::HashMap;
use once_cell::sync::Lazy;

/// Sentinel bucket for records with a missing or unrecognized attribute
pub const UNKNOWN: &str = "Unknown";

/// Visual encoding of one event type, shared by markers, charts, the
/// recent list and the legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeStyle {
    /// Fill color, CSS hex
    pub fill: &'static str,
    /// Marker border color, CSS rgba
    pub stroke: &'static str,
    /// Heat sample weight for this event type
    pub heat_weight: f64,
}

/// Fallback style for event types without a palette entry
pub const FALLBACK_STYLE: TypeStyle = TypeStyle {
    fill: "#7f8c8d",
    stroke: "rgba(127,140,141,0.4)",
    heat_weight: 0.7,
};

/// Event-type palette, in legend order
pub static TYPE_PALETTE: &[(&str, TypeStyle)] = &[
    (
        "Protests",
        TypeStyle {
            fill: "#8e44ad",
            stroke: "rgba(142,68,173,0.4)",
            heat_weight: 0.6,
        },
    ),
    (
        "Violence against civilians",
        TypeStyle {
            fill: "#2ecc71",
            stroke: "rgba(231,76,60,0.4)",
            heat_weight: 1.0,
        },
    ),
    (
        "Riots",
        TypeStyle {
            fill: "#f39c12",
            stroke: "rgba(243,156,18,0.4)",
            heat_weight: 0.9,
        },
    ),
    (
        "Battles",
        TypeStyle {
            fill: "#3498db",
            stroke: "rgba(52,152,219,0.4)",
            heat_weight: 0.8,
        },
    ),
    (
        "Explosions/Remote violence",
        TypeStyle {
            fill: "#e62222",
            stroke: "rgba(230,126,34,0.4)",
            heat_weight: 0.9,
        },
    ),
    (
        "Strategic developments",
        TypeStyle {
            fill: "#404241",
            stroke: "rgba(46,204,113,0.4)",
            heat_weight: 0.4,
        },
    ),
];

static PALETTE_INDEX: Lazy<HashMap<&'static str, &'static TypeStyle>> = Lazy::new(|| {
    TYPE_PALETTE
        .iter()
        .map(|(name, style)| (*name, style))
        .collect()
});

/// Style for an event type; unrecognized or missing types get the
/// fallback style.
pub fn type_style(event_type: Option<&str>) -> &'static TypeStyle {
    event_type
        .and_then(|t| PALETTE_INDEX.get(t).copied())
        .unwrap_or(&FALLBACK_STYLE)
}

/// Legend model: one palette row per event type plus the hotspot
/// gradient ramp.
#[derive(Debug, Clone)]
pub struct Legend {
    /// (event type, fill color) rows in palette order
    pub entries: Vec<(&'static str, &'static str)>,
    /// Low-to-high hotspot gradient stops
    pub hotspot_gradient: [&'static str; 3],
}

impl Legend {
    pub fn new() -> Self {
        Self {
            entries: TYPE_PALETTE.iter().map(|(name, s)| (*name, s.fill)).collect(),
            hotspot_gradient: ["#4facfe", "#ffeb3b", "#ff0000"],
        }
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_type_lookup() {
        assert_eq!(type_style(Some("Riots")).fill, "#f39c12");
        assert_eq!(type_style(Some("Protests")).heat_weight, 0.6);
    }

    #[test]
    fn test_unknown_type_falls_back() {
        assert_eq!(type_style(Some("Alien invasion")), &FALLBACK_STYLE);
        assert_eq!(type_style(None), &FALLBACK_STYLE);
    }

    #[test]
    fn test_legend_covers_palette() {
        let legend = Legend::new();
        assert_eq!(legend.entries.len(), TYPE_PALETTE.len());
        assert_eq!(legend.entries[0].0, "Protests");
    }
}
