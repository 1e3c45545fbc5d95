//! Built-in constellation figures, as Hipparcos number pairs.

use super::ConstellationEdge;

const fn edge(a: usize, b: usize) -> ConstellationEdge {
    ConstellationEdge::new(a, b)
}

const URSA_MAJOR: &[ConstellationEdge] = &[
    edge(50801, 53910), // Dubhe - Merak
    edge(53910, 58001), // Merak - Phecda
    edge(58001, 59774), // Phecda - Megrez
    edge(59774, 62956), // Megrez - Alioth
    edge(62956, 65378), // Alioth - Mizar
    edge(65378, 67301), // Mizar - Alkaid
    edge(59774, 54061), // Megrez - Dubhe, closing the bowl
];

const ORION: &[ConstellationEdge] = &[
    edge(25336, 25930), // Betelgeuse - Bellatrix
    edge(27989, 28716), // Rigel - Saiph
    edge(25930, 26207), // Bellatrix - Alnilam
    edge(26207, 25336), // Alnilam - Betelgeuse
    edge(26207, 27989), // Alnilam - Rigel
];

const CASSIOPEIA: &[ConstellationEdge] = &[
    edge(3179, 6686),   // Caph - Schedar
    edge(6686, 11415),  // Schedar - Gamma Cas
    edge(11415, 14404), // Gamma Cas - Ruchbah
    edge(14404, 21609), // Ruchbah - Segin
];

/// Name and edge list of every built-in figure
pub const CONSTELLATION_LINES: &[(&str, &[ConstellationEdge])] = &[
    ("Ursa Major", URSA_MAJOR),
    ("Orion", ORION),
    ("Cassiopeia", CASSIOPEIA),
];
