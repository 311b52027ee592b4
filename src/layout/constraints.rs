//! Constraint mapping for absolutely positioned nodes.
//!
//! Maps the design tool's per-axis constraints into CSS-like offset
//! fields relative to the *immediate* parent bounds. SCALE constraints
//! become percentages of the parent extent; the stretch constraints
//! (LEFT_RIGHT / TOP_BOTTOM) pin both edges and leave the extent auto.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ir::geom::{Canvas, Rect};
use crate::raw::{Constraints, HorizontalConstraint, VerticalConstraint};

/// A CSS-like length: absolute pixels, a percentage of the parent, or
/// automatic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dimension {
    Px(f64),
    Percent(f64),
    Auto,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Px(v) => write!(f, "{}px", trim_float(*v)),
            Dimension::Percent(v) => write!(f, "{}%", trim_float(*v)),
            Dimension::Auto => write!(f, "auto"),
        }
    }
}

fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", (v * 100.0).round() / 100.0)
    }
}

// Serialized as a bare number for pixels, "N%" for percentages and
// "auto" for the rest, matching what style emitters expect.
impl Serialize for Dimension {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dimension::Px(v) => serializer.serialize_f64(*v),
            Dimension::Percent(_) | Dimension::Auto => serializer.serialize_str(&self.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(Dimension::Px(v)),
            Repr::Text(s) if s == "auto" => Ok(Dimension::Auto),
            Repr::Text(s) => {
                let stripped = s
                    .strip_suffix('%')
                    .ok_or_else(|| D::Error::custom(format!("invalid dimension '{}'", s)))?;
                let value = stripped
                    .parse::<f64>()
                    .map_err(|_| D::Error::custom(format!("invalid dimension '{}'", s)))?;
                Ok(Dimension::Percent(value))
            }
        }
    }
}

/// Offset fields for one absolutely positioned node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AbsolutePosition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

/// Maps one node's constraints against its immediate parent bounds.
///
/// Absent constraints default to the leading edges (LEFT / TOP).
pub fn map_constraints(
    child: Rect<Canvas>,
    parent: Rect<Canvas>,
    constraints: Option<Constraints>,
) -> AbsolutePosition {
    let rel = child.to_local(&parent);
    let horizontal = constraints.map(|c| c.horizontal).unwrap_or_default();
    let vertical = constraints.map(|c| c.vertical).unwrap_or_default();

    let mut position = AbsolutePosition::default();

    match horizontal {
        HorizontalConstraint::Left | HorizontalConstraint::Unknown => {
            position.left = Some(Dimension::Px(rel.x));
            position.width = Some(Dimension::Px(rel.width));
        }
        HorizontalConstraint::Right => {
            position.right = Some(Dimension::Px(parent.width - rel.x - rel.width));
            position.width = Some(Dimension::Px(rel.width));
        }
        HorizontalConstraint::Center => {
            // Anchored by the measured leading offset; centering itself
            // is carried by the parent's alignment.
            position.left = Some(Dimension::Px(rel.x));
            position.width = Some(Dimension::Px(rel.width));
        }
        HorizontalConstraint::LeftRight => {
            position.left = Some(Dimension::Px(rel.x));
            position.right = Some(Dimension::Px(parent.width - rel.x - rel.width));
            position.width = Some(Dimension::Auto);
        }
        HorizontalConstraint::Scale => {
            position.left = Some(percent_of(rel.x, parent.width));
            position.width = Some(percent_of(rel.width, parent.width));
        }
    }

    match vertical {
        VerticalConstraint::Top | VerticalConstraint::Unknown => {
            position.top = Some(Dimension::Px(rel.y));
            position.height = Some(Dimension::Px(rel.height));
        }
        VerticalConstraint::Bottom => {
            position.bottom = Some(Dimension::Px(parent.height - rel.y - rel.height));
            position.height = Some(Dimension::Px(rel.height));
        }
        VerticalConstraint::Center => {
            position.top = Some(Dimension::Px(rel.y));
            position.height = Some(Dimension::Px(rel.height));
        }
        VerticalConstraint::TopBottom => {
            position.top = Some(Dimension::Px(rel.y));
            position.bottom = Some(Dimension::Px(parent.height - rel.y - rel.height));
            position.height = Some(Dimension::Auto);
        }
        VerticalConstraint::Scale => {
            position.top = Some(percent_of(rel.y, parent.height));
            position.height = Some(percent_of(rel.height, parent.height));
        }
    }

    position
}

/// `(offset / extent) * 100`, falling back to pixels when the parent
/// extent is degenerate.
fn percent_of(offset: f64, extent: f64) -> Dimension {
    if extent <= 0.0 {
        return Dimension::Px(offset);
    }
    Dimension::Percent((offset / extent) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints(h: HorizontalConstraint, v: VerticalConstraint) -> Option<Constraints> {
        Some(Constraints {
            horizontal: h,
            vertical: v,
        })
    }

    #[test]
    fn test_default_constraints_pin_leading_edges() {
        let child: Rect<Canvas> = Rect::new(120.0, 230.0, 50.0, 40.0);
        let parent: Rect<Canvas> = Rect::new(100.0, 200.0, 400.0, 400.0);
        let position = map_constraints(child, parent, None);
        assert_eq!(position.left, Some(Dimension::Px(20.0)));
        assert_eq!(position.top, Some(Dimension::Px(30.0)));
        assert_eq!(position.width, Some(Dimension::Px(50.0)));
        assert!(position.right.is_none());
    }

    #[test]
    fn test_right_bottom_constraints() {
        let child: Rect<Canvas> = Rect::new(300.0, 350.0, 50.0, 40.0);
        let parent: Rect<Canvas> = Rect::new(0.0, 0.0, 400.0, 400.0);
        let position = map_constraints(
            child,
            parent,
            constraints(HorizontalConstraint::Right, VerticalConstraint::Bottom),
        );
        assert_eq!(position.right, Some(Dimension::Px(50.0)));
        assert_eq!(position.bottom, Some(Dimension::Px(10.0)));
        assert!(position.left.is_none());
    }

    #[test]
    fn test_scale_yields_percentages() {
        let child: Rect<Canvas> = Rect::new(50.0, 0.0, 100.0, 40.0);
        let parent: Rect<Canvas> = Rect::new(0.0, 0.0, 200.0, 400.0);
        let position = map_constraints(
            child,
            parent,
            constraints(HorizontalConstraint::Scale, VerticalConstraint::Top),
        );
        assert_eq!(position.left, Some(Dimension::Percent(25.0)));
        assert_eq!(position.width, Some(Dimension::Percent(50.0)));
    }

    #[test]
    fn test_stretch_pins_both_edges_with_auto_extent() {
        let child: Rect<Canvas> = Rect::new(16.0, 10.0, 368.0, 40.0);
        let parent: Rect<Canvas> = Rect::new(0.0, 0.0, 400.0, 400.0);
        let position = map_constraints(
            child,
            parent,
            constraints(HorizontalConstraint::LeftRight, VerticalConstraint::Top),
        );
        assert_eq!(position.left, Some(Dimension::Px(16.0)));
        assert_eq!(position.right, Some(Dimension::Px(16.0)));
        assert_eq!(position.width, Some(Dimension::Auto));
    }

    #[test]
    fn test_scale_in_degenerate_parent_falls_back_to_px() {
        let child: Rect<Canvas> = Rect::new(10.0, 0.0, 20.0, 40.0);
        let parent: Rect<Canvas> = Rect::new(0.0, 0.0, 0.0, 400.0);
        let position = map_constraints(
            child,
            parent,
            constraints(HorizontalConstraint::Scale, VerticalConstraint::Top),
        );
        assert_eq!(position.left, Some(Dimension::Px(10.0)));
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::Px(16.0).to_string(), "16px");
        assert_eq!(Dimension::Percent(25.0).to_string(), "25%");
        assert_eq!(Dimension::Percent(33.333333).to_string(), "33.33%");
        assert_eq!(Dimension::Auto.to_string(), "auto");
    }

    #[test]
    fn test_dimension_serde() {
        let json = serde_json::to_string(&Dimension::Percent(25.0)).unwrap();
        assert_eq!(json, "\"25%\"");
        let back: Dimension = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Dimension::Percent(25.0));

        let px = serde_json::to_string(&Dimension::Px(12.0)).unwrap();
        assert_eq!(px, "12.0");
        let back: Dimension = serde_json::from_str(&px).unwrap();
        assert_eq!(back, Dimension::Px(12.0));
    }
}
