use serde::{Deserialize, Serialize};

/// A tracked location as stored in the city list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Coarse label derived from the UTC hour of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOfDay {
    Day,
    EveningMorning,
    Night,
}

impl TimeOfDay {
    /// Clauses are checked in order, so 12 and 18 both land in `Day`.
    pub fn from_hour(hour: u32) -> Self {
        if (12..=18).contains(&hour) {
            TimeOfDay::Day
        } else if (hour > 18 && hour < 23) || (hour > 6 && hour < 12) {
            TimeOfDay::EveningMorning
        } else {
            TimeOfDay::Night
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::EveningMorning => "evening-morning",
            TimeOfDay::Night => "night",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions for one city, computed per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Id of the stored city, `None` when the lookup was for an unstored name.
    pub id: Option<i64>,
    pub hour: u32,
    pub time_of_day: TimeOfDay,
    pub temperature_c: f64,
    /// Name as echoed by the provider; may differ from the stored query.
    pub city_name: String,
    pub description: String,
}

impl WeatherSnapshot {
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}
