use serde::{Deserialize, Serialize};

/// Which leg of the round trip a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegDirection {
    Outbound,
    Return,
}

/// Stop-count classification scraped from a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopsClass {
    Nonstop,
    Stops(u32),
    Unknown,
}

impl std::fmt::Display for StopsClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nonstop => write!(f, "Nonstop"),
            Self::Stops(1) => write!(f, "1 stop"),
            Self::Stops(n) => write!(f, "{n} stops"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One itinerary as observed in a single render pass.
///
/// Every field is always present; unparseable sub-fields carry their
/// documented default ("Unknown" strings, 0.0 price) rather than an
/// absent key. A price of 0.0 means "unparsed", not "free". Records are
/// immutable once built — a later render pass supersedes, never mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryRecord {
    pub airline: String,
    pub price: f64,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub stops: StopsClass,
    /// Opaque address that re-enters this exact result set later.
    pub continuation: String,
    pub leg: LegDirection,
}

impl std::fmt::Display for ItineraryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ${:.2} {} -> {} ({}, {})",
            self.airline,
            self.price,
            self.departure_time,
            self.arrival_time,
            self.duration,
            self.stops
        )
    }
}

/// Caller-supplied subset of a previously returned record, used to
/// re-find that row in a fresh, independently ordered render pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchCriteria {
    #[serde(default)]
    pub airline: Option<String>,
    #[serde(default)]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stops: Option<String>,
}

impl MatchCriteria {
    /// Relocation is only considered reliable with airline, both times,
    /// and price present. Fewer fields widen the net enough that the
    /// first match may be the wrong row.
    pub fn is_reliable(&self) -> bool {
        self.airline.is_some()
            && self.departure_time.is_some()
            && self.arrival_time.is_some()
            && self.price.is_some()
    }
}

impl From<&ItineraryRecord> for MatchCriteria {
    fn from(record: &ItineraryRecord) -> Self {
        Self {
            airline: Some(record.airline.clone()),
            departure_time: Some(record.departure_time.clone()),
            arrival_time: Some(record.arrival_time.clone()),
            price: Some(record.price),
            stops: match record.stops {
                StopsClass::Unknown => None,
                s => Some(s.to_string()),
            },
        }
    }
}
