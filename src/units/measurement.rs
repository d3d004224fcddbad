use serde::{Deserialize, Serialize};

/// The kind of quantity a value measures, which decides how it converts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measurement {
    Temperature,
    Speed,
    Direction,
}
