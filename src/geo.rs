//! State Coordinate Table
//!
//! Maps Indian state names to map coordinates for the marker view.
//! Lookups are keyed by a normalized name (ASCII letters and digits only),
//! so "Andhra Pradesh" and "Andhra Pradesh*" both resolve to the same entry.

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Placeholder for regions without a table entry.
    pub const ZERO: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };
}

/// Normalize a raw region name into a lookup key.
///
/// Removes whitespace and every character that is not an ASCII letter or
/// digit. Idempotent: normalizing an already-normalized name is a no-op.
pub fn normalize_name(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Look up the coordinates for a normalized state name.
///
/// Total function: unknown names (including the empty string) map to
/// [`Coordinate::ZERO`] rather than an error. Matching is exact and
/// case-sensitive.
pub fn lookup(normalized: &str) -> Coordinate {
    STATE_COORDINATES
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, coord)| *coord)
        .unwrap_or(Coordinate::ZERO)
}

const fn coord(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate {
        latitude,
        longitude,
    }
}

/// Fixed table of Indian state coordinates, keyed by normalized name.
const STATE_COORDINATES: &[(&str, Coordinate)] = &[
    ("AndhraPradesh", coord(15.9129, 79.9867)),
    ("ArunachalPradesh", coord(28.218, 93.615)),
    ("Assam", coord(26.2006, 92.9376)),
    ("Bihar", coord(25.0961, 85.3162)),
    ("Chhattisgarh", coord(21.2787, 82.402)),
    ("Goa", coord(15.2993, 74.124)),
    ("Gujarat", coord(22.2587, 72.5714)),
    ("Haryana", coord(29.0588, 76.0855)),
    ("HimachalPradesh", coord(31.1048, 77.1709)),
    ("Jharkhand", coord(23.6102, 85.579)),
    ("Karnataka", coord(15.3173, 75.7139)),
    ("Kerala", coord(10.8505, 76.2711)),
    ("MadhyaPradesh", coord(22.9734, 78.6569)),
    ("Maharashtra", coord(19.3012, 75.3433)),
    ("Manipur", coord(24.6637, 93.9952)),
    ("Meghalaya", coord(25.467, 91.5822)),
    ("Mizoram", coord(23.1645, 92.9376)),
    ("Nagaland", coord(26.1584, 94.5624)),
    ("Odisha", coord(20.9517, 85.8314)),
    ("Punjab", coord(30.9009, 75.8423)),
    ("Rajasthan", coord(27.0238, 73.8478)),
    ("Sikkim", coord(27.533, 88.6158)),
    ("TamilNadu", coord(11.1271, 78.6569)),
    ("Telangana", coord(17.0738, 79.0193)),
    ("Tripura", coord(23.94, 91.3882)),
    ("UttarPradesh", coord(26.8467, 80.9462)),
    ("Uttarakhand", coord(30.0668, 78.6569)),
    ("WestBengal", coord(22.9868, 88.3639)),
];
