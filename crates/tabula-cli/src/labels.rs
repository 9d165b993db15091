//! Header label bundle for rendering.
//!
//! Lengths are invariants of the grid shape: a bundle with the wrong number
//! of entries is a broken installation, so validation is a hard assertion
//! rather than a recoverable error.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use tabula_model::{COLUMN_COUNT, ROW_COUNT};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Labels {
    /// One header per time slot.
    pub row_headers: Vec<String>,
    /// Corner label followed by one header per day.
    pub column_headers: Vec<String>,
    /// One tooltip per time slot.
    pub row_tooltips: Vec<String>,
}

impl Labels {
    /// Load a labels bundle from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening labels file {}", path.display()))?;
        let labels: Labels = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing labels file {}", path.display()))?;
        labels.validate();
        Ok(labels)
    }

    fn validate(&self) {
        assert_eq!(
            self.row_headers.len(),
            ROW_COUNT,
            "labels must carry {ROW_COUNT} row headers"
        );
        assert_eq!(
            self.column_headers.len(),
            COLUMN_COUNT + 1,
            "labels must carry {} column headers",
            COLUMN_COUNT + 1
        );
        assert_eq!(
            self.row_tooltips.len(),
            ROW_COUNT,
            "labels must carry {ROW_COUNT} row tooltips"
        );
    }
}

impl Default for Labels {
    fn default() -> Self {
        let labels = Labels {
            row_headers: (1..=ROW_COUNT).map(|slot| slot.to_string()).collect(),
            column_headers: ["", "Mon", "Tue", "Wed", "Thu", "Fri"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            row_tooltips: (1..=ROW_COUNT)
                .map(|slot| format!("Period {slot}"))
                .collect(),
        };
        labels.validate();
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_labels_match_the_grid_shape() {
        let labels = Labels::default();
        assert_eq!(labels.row_headers.len(), ROW_COUNT);
        assert_eq!(labels.column_headers.len(), COLUMN_COUNT + 1);
    }

    #[test]
    #[should_panic(expected = "row headers")]
    fn wrong_row_header_count_is_fatal() {
        let mut labels = Labels::default();
        labels.row_headers.pop();
        labels.validate();
    }

    #[test]
    #[should_panic(expected = "column headers")]
    fn wrong_column_header_count_is_fatal() {
        let mut labels = Labels::default();
        labels.column_headers.push("Sat".to_string());
        labels.validate();
    }

    #[test]
    fn labels_round_trip_through_json() {
        let labels = Labels::default();
        let json = serde_json::to_string(&labels).unwrap();
        let parsed: Labels = serde_json::from_str(&json).unwrap();
        parsed.validate();
        assert_eq!(parsed.row_tooltips, labels.row_tooltips);
    }
}
