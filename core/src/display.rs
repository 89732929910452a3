use serde::{Deserialize, Serialize};

use crate::geometry::ScreenRect;

/// A connected monitor as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayDescriptor {
    pub id: u32,
    pub index: usize,
    pub label: Option<String>,
    pub bounds: ScreenRect,
    pub primary: bool,
}

impl DisplayDescriptor {
    pub fn name(&self) -> String {
        match &self.label {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ => format!("Display {}", self.index + 1),
        }
    }

    pub fn resolution(&self) -> String {
        format!("{} x {}", self.bounds.width, self.bounds.height)
    }
}

/// One entry of the display selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayOption {
    pub index: usize,
    pub label: String,
}

/// Build the selection list, falling back to a single synthetic entry.
pub fn display_options(displays: &[DisplayDescriptor]) -> Vec<DisplayOption> {
    if displays.is_empty() {
        return vec![fallback_option()];
    }

    displays
        .iter()
        .enumerate()
        .map(|(index, display)| {
            let mut label = display.name();
            if display.primary {
                label.push_str(" (Primary)");
            }
            label.push_str(&format!(" - {}", display.resolution()));
            DisplayOption { index, label }
        })
        .collect()
}

fn fallback_option() -> DisplayOption {
    DisplayOption {
        index: 0,
        label: "Display 1 (Primary)".to_string(),
    }
}

/// Display selection list plus the current choice.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySelector {
    options: Vec<DisplayOption>,
    selected: usize,
}

impl Default for DisplaySelector {
    fn default() -> Self {
        Self {
            options: vec![fallback_option()],
            selected: 0,
        }
    }
}

impl DisplaySelector {
    pub fn options(&self) -> &[DisplayOption] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Replace the list, keeping `saved` when it is still in range.
    pub fn populate(&mut self, displays: &[DisplayDescriptor], saved: Option<usize>) {
        self.options = display_options(displays);
        self.selected = saved.filter(|&i| i < self.options.len()).unwrap_or(0);
    }

    pub fn use_fallback(&mut self) {
        *self = Self::default();
    }

    /// Returns false when `index` is not in the list.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.options.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.options.len()
    }
}

/// Content of the transient full-screen display indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorView {
    pub label: String,
    pub role: String,
    pub resolution: String,
}

impl IndicatorView {
    pub fn for_display(display: &DisplayDescriptor) -> Self {
        Self {
            label: display.name(),
            role: if display.primary {
                "Primary Display".to_string()
            } else {
                "Secondary Display".to_string()
            },
            resolution: display.resolution(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(index: usize, label: Option<&str>, x: i32, primary: bool) -> DisplayDescriptor {
        DisplayDescriptor {
            id: index as u32 + 100,
            index,
            label: label.map(str::to_string),
            bounds: ScreenRect::new(x, 0, 1920, 1080),
            primary,
        }
    }

    #[test]
    fn test_empty_list_falls_back_to_one_entry() {
        let options = display_options(&[]);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label, "Display 1 (Primary)");
        assert_eq!(options[0].index, 0);
    }

    #[test]
    fn test_labels() {
        let options = display_options(&[
            display(0, Some("Built-in Retina"), 0, true),
            display(1, None, 1920, false),
        ]);
        assert_eq!(options[0].label, "Built-in Retina (Primary) - 1920 x 1080");
        assert_eq!(options[1].label, "Display 2 - 1920 x 1080");
    }

    #[test]
    fn test_saved_selection_restored_only_in_range() {
        let displays = [display(0, None, 0, true), display(1, None, 1920, false)];
        let mut selector = DisplaySelector::default();

        selector.populate(&displays, Some(1));
        assert_eq!(selector.selected(), 1);

        selector.populate(&displays, Some(5));
        assert_eq!(selector.selected(), 0);

        assert!(!selector.select(2));
        assert!(selector.select(1));
    }

    #[test]
    fn test_indicator_carries_plain_text_fields() {
        let view = IndicatorView::for_display(&display(1, Some("<LG>"), 1920, false));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["label"], "<LG>");
        assert_eq!(json["role"], "Secondary Display");
        assert_eq!(json["resolution"], "1920 x 1080");
    }
}
