//! Static physician roster used for display lookups.
//!
//! Names must match the `primaryPhysician` value stored on appointment
//! records exactly. No case or whitespace normalization is applied.

use serde::Serialize;

/// Built-in roster: `(name, image path)`.
const PHYSICIANS: &[(&str, &str)] = &[
    ("John Green", "/assets/images/dr-green.png"),
    ("Leila Cameron", "/assets/images/dr-cameron.png"),
    ("David Livingston", "/assets/images/dr-livingston.png"),
    ("Evan Peter", "/assets/images/dr-peter.png"),
    ("Jane Powell", "/assets/images/dr-powell.png"),
    ("Alex Ramirez", "/assets/images/dr-remirez.png"),
    ("Jasmine Lee", "/assets/images/dr-lee.png"),
    ("Alyana Cruz", "/assets/images/dr-cruz.png"),
    ("Hardik Sharma", "/assets/images/dr-sharma.png"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Physician {
    pub name: String,
    /// Public path of the physician's portrait.
    pub image: String,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    physicians: Vec<Physician>,
}

impl Roster {
    pub fn new(physicians: Vec<Physician>) -> Self {
        Self { physicians }
    }

    /// The portal's physicians.
    pub fn builtin() -> Self {
        Self::new(
            PHYSICIANS
                .iter()
                .map(|(name, image)| Physician {
                    name: (*name).to_string(),
                    image: (*image).to_string(),
                })
                .collect(),
        )
    }

    /// First physician whose name equals `name` exactly.
    pub fn find(&self, name: &str) -> Option<&Physician> {
        self.physicians.iter().find(|p| p.name == name)
    }

    pub fn physicians(&self) -> &[Physician] {
        &self.physicians
    }
}
