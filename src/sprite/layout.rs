//! Placement of symbols in the sprite's outer coordinate space
//!
//! Symbols keep their own viewBox, so placement only matters for shadow
//! `use` elements, `view` fragments, inline content and the root size.

use std::str::FromStr;

use serde::Deserialize;

use crate::geometry::ViewBox;

/// Sizing policy for the root box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPolicy {
    /// Every symbol at the origin; the root is as large as the largest member
    #[default]
    Max,
    /// Symbols stacked top to bottom, separated by the gutter
    Stack,
}

impl FromStr for LayoutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max" => Ok(Self::Max),
            "stack" => Ok(Self::Stack),
            other => Err(format!("unknown layout '{other}' (expected 'max' or 'stack')")),
        }
    }
}

/// Region one symbol occupies in root coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Slot {
    pub fn view_box(&self) -> ViewBox {
        ViewBox::new(self.x, self.y, self.width, self.height)
    }
}

/// Result of arranging every symbol
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub slots: Vec<Slot>,
    pub width: f64,
    pub height: f64,
}

impl LayoutPolicy {
    /// Place each box, in order
    pub fn arrange(self, boxes: &[ViewBox], gutter: f64) -> Layout {
        let width = boxes.iter().map(|b| b.width).fold(0.0, f64::max);

        match self {
            LayoutPolicy::Max => Layout {
                slots: boxes
                    .iter()
                    .map(|b| Slot {
                        x: 0.0,
                        y: 0.0,
                        width: b.width,
                        height: b.height,
                    })
                    .collect(),
                width,
                height: boxes.iter().map(|b| b.height).fold(0.0, f64::max),
            },
            LayoutPolicy::Stack => {
                let mut y = 0.0;
                let mut slots = Vec::with_capacity(boxes.len());
                for (i, b) in boxes.iter().enumerate() {
                    if i > 0 {
                        y += gutter;
                    }
                    slots.push(Slot {
                        x: 0.0,
                        y,
                        width: b.width,
                        height: b.height,
                    });
                    y += b.height;
                }
                Layout {
                    slots,
                    width,
                    height: y,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes() -> Vec<ViewBox> {
        vec![
            ViewBox::new(0.0, 0.0, 16.0, 16.0),
            ViewBox::new(4.0, 4.0, 32.0, 8.0),
        ]
    }

    #[test]
    fn test_max_layout_takes_largest_dimensions() {
        let layout = LayoutPolicy::Max.arrange(&boxes(), 10.0);
        assert_eq!((layout.width, layout.height), (32.0, 16.0));
        assert!(layout.slots.iter().all(|s| s.x == 0.0 && s.y == 0.0));
        assert_eq!(layout.slots[1].width, 32.0);
    }

    #[test]
    fn test_stack_layout_accumulates_heights_and_gutters() {
        let layout = LayoutPolicy::Stack.arrange(&boxes(), 2.0);
        assert_eq!(layout.slots[0].y, 0.0);
        assert_eq!(layout.slots[1].y, 18.0);
        assert_eq!((layout.width, layout.height), (32.0, 26.0));
    }

    #[test]
    fn test_empty_layout() {
        let layout = LayoutPolicy::Stack.arrange(&[], 5.0);
        assert!(layout.slots.is_empty());
        assert_eq!((layout.width, layout.height), (0.0, 0.0));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("stack".parse::<LayoutPolicy>(), Ok(LayoutPolicy::Stack));
        assert!("grid".parse::<LayoutPolicy>().is_err());
    }
}
