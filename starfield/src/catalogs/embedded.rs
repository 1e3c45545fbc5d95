//! Small built-in catalog used when no Hipparcos data is available.
//!
//! Covers the stars referenced by the built-in constellation figures, so a
//! chart drawn from it always has its figures complete.

use super::{SkyCatalog, StarRecord};
use crate::error::CatalogError;

/// (HIP, RA deg, Dec deg, V mag)
const SAMPLE_STARS: &[(usize, f64, f64, f64)] = &[
    // Ursa Major
    (50801, 165.931, 61.751, 1.8), // Dubhe
    (53910, 165.460, 56.382, 2.4), // Merak
    (58001, 178.457, 53.695, 2.4), // Phecda
    (59774, 183.856, 57.032, 3.3), // Megrez
    (62956, 193.507, 55.960, 1.8), // Alioth
    (65378, 200.981, 54.925, 2.3), // Mizar
    (67301, 206.885, 49.313, 1.9), // Alkaid
    (54061, 166.079, 61.751, 1.8), // Dubhe, second figure vertex
    // Orion
    (25336, 88.793, 7.407, 0.4),  // Betelgeuse
    (25930, 81.283, 6.350, 1.6),  // Bellatrix
    (26207, 84.053, -1.202, 1.7), // Alnilam
    (27989, 78.634, -8.202, 0.1), // Rigel
    (28716, 86.939, -9.670, 2.1), // Saiph
    // Cassiopeia
    (3179, 9.182, 59.150, 2.3),   // Caph
    (6686, 14.177, 56.537, 2.2),  // Schedar
    (11415, 14.177, 60.717, 2.5), // Gamma Cas
    (14404, 23.396, 57.815, 2.7), // Ruchbah
    (21609, 28.599, 63.670, 3.4), // Segin
];

/// Build the embedded sample catalog with constellation figures attached.
pub fn sample_catalog() -> Result<SkyCatalog, CatalogError> {
    let stars = SAMPLE_STARS
        .iter()
        .map(|&(id, ra, dec, mag)| StarRecord::new(id, ra, dec, mag))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SkyCatalog::from_stars(stars).with_constellation_lines())
}
