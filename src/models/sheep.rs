use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single sheep record.
///
/// `id` is assigned by the record store when the record is added and never
/// changes afterwards. `tag` is the short label painted or clipped on the
/// animal; it is not required to be unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sheep {
    pub id: String,
    pub tag: String,
    pub breed: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub status: SheepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Sheep {
    /// Build a full record from input fields and a freshly assigned id.
    pub fn from_new(id: String, input: NewSheep) -> Self {
        Self {
            id,
            tag: input.tag,
            breed: input.breed,
            dob: input.dob,
            gender: input.gender,
            status: input.status,
            notes: input.notes,
        }
    }

    /// Whether the sale calculator may offer this animal.
    pub fn is_available_for_sale(&self) -> bool {
        !matches!(self.status, SheepStatus::Sold | SheepStatus::Dead)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

/// Health / lifecycle status of a sheep.
///
/// - `Healthy` and `Sick` are swapped freely by manual edits
/// - `Sold` is normally reached through a confirmed sale
/// - `Dead` is only set by a manual edit
///
/// Nothing prevents further edits to a `Sold` or `Dead` record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SheepStatus {
    Healthy,
    Sick,
    Sold,
    Dead,
}

impl SheepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Sick => "Sick",
            Self::Sold => "Sold",
            Self::Dead => "Dead",
        }
    }
}

/// Input for adding a sheep. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSheep {
    pub tag: String,
    pub breed: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    #[serde(default = "default_status")]
    pub status: SheepStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_status() -> SheepStatus {
    SheepStatus::Healthy
}

/// Full replacement of a record's editable fields.
///
/// The id comes from the request path; an id in the body, if any, is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateSheepInput {
    pub tag: String,
    pub breed: String,
    pub dob: NaiveDate,
    pub gender: Gender,
    pub status: SheepStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdateSheepInput {
    pub fn into_sheep(self, id: String) -> Sheep {
        Sheep {
            id,
            tag: self.tag,
            breed: self.breed,
            dob: self.dob,
            gender: self.gender,
            status: self.status,
            notes: self.notes,
        }
    }
}
