use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The name of a recorded signal, in `Device/Signal` form (e.g. `Solar8000/HR`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackName(pub SmolStr);
impl TrackName {
    /// The tracks selected by default when they are available.
    pub const DEFAULTS: [&str; 5] = [
        "BIS/BIS",
        "Solar8000/HR",
        "Solar8000/ART_SBP",
        "Solar8000/PLETH_SPO2",
        "Solar8000/ETCO2",
    ];

    /// Creates a track name.
    pub fn new(name: impl AsRef<str>) -> Self {
        TrackName(SmolStr::new(name))
    }

    /// The full name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl std::fmt::Display for TrackName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_a_bare_string() {
        let tracks = vec![TrackName::new("BIS/BIS"), TrackName::new("Solar8000/HR")];
        assert_eq!(
            serde_json::to_string(&tracks).unwrap(),
            r#"["BIS/BIS","Solar8000/HR"]"#
        );
    }
}
