use nalgebra::Point3;

/// Represents a single atom read from a coordinate record.
///
/// Atoms are owned by exactly one [`Residue`](super::residue::Residue) and are never
/// shared. All fields are plain data; geometric queries are performed on
/// [`position`](Atom::position) directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The serial number from the source record.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "OG", "C1").
    pub name: String,
    /// The element symbol, upper-cased (e.g., "C", "N", "FE").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Alternate location indicator, if the record carried one.
    pub alt_loc: Option<char>,
}

impl Atom {
    /// Creates a new `Atom` without an alternate location indicator.
    ///
    /// The element symbol is normalized to upper case so downstream classification
    /// never has to care about the casing used by the source file.
    ///
    /// # Arguments
    ///
    /// * `serial` - The record serial number.
    /// * `name` - The atom name.
    /// * `element` - The element symbol.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(serial: usize, name: &str, element: &str, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: name.trim().to_string(),
            element: element.trim().to_ascii_uppercase(),
            position,
            alt_loc: None,
        }
    }

    /// Euclidean distance to another atom in Angstroms.
    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}

/// Infers an element symbol from an atom name when the element column is blank.
///
/// Takes the first alphabetic character of the name, so `"1HB2"` becomes `"H"` and
/// `"CA"` becomes `"C"`. Two-letter elements cannot be recovered this way and must be
/// given explicitly in the source record.
pub fn infer_element(atom_name: &str) -> String {
    atom_name
        .trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}
