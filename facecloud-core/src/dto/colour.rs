//! Colour DTOs

use serde::{Deserialize, Serialize};

/// Response of `POST /face_segmentation/get_mean_colour/`
///
/// `results` holds the red, green and blue means in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanColour {
    pub results: Vec<f64>,
}

impl MeanColour {
    pub fn from_rgb(rgb: [f64; 3]) -> Self {
        Self {
            results: rgb.to_vec(),
        }
    }

    /// Returns the colour as an `[r, g, b]` triple if the body is well formed
    pub fn rgb(&self) -> Option<[f64; 3]> {
        match self.results.as_slice() {
            [r, g, b] => Some([*r, *g, *b]),
            _ => None,
        }
    }
}
