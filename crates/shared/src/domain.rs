use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(GuestId);

impl std::fmt::Display for GuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Answer given on the RSVP form. "Not answered yet" is modeled as `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attendance {
    #[serde(rename = "SI")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

impl Attendance {
    pub fn as_wire(self) -> &'static str {
        match self {
            Attendance::Yes => "SI",
            Attendance::No => "NO",
        }
    }
}

/// One invited party as seen by the RSVP form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestRecord {
    pub id: GuestId,
    pub display_name: String,
    pub max_party_size: u32,
}
