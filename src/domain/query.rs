use chrono::NaiveDate;
use url::Url;

use crate::error::{FlightError, Result};

/// A round-trip search request. Airport codes must already be 3-letter
/// IATA codes and dates `YYYY-MM-DD`; translating city names or natural
/// language is the decision-maker's job, not ours.
#[derive(Debug, Clone)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub depart_date: String,
    pub return_date: String,
}

impl FlightQuery {
    pub fn validate(&self) -> Result<()> {
        validate_iata(&self.origin, "origin")?;
        validate_iata(&self.destination, "destination")?;

        let depart = parse_date(&self.depart_date, "depart_date")?;
        let ret = parse_date(&self.return_date, "return_date")?;
        if ret < depart {
            return Err(FlightError::InvalidQuery {
                reason: "return date must not precede departure date".into(),
            });
        }

        Ok(())
    }

    /// Build the initial search address. The query phrase is understood
    /// by the travel UI's search box parser, which is far more stable
    /// than locating and typing into individual form fields.
    pub fn to_search_url(&self, base_url: &str) -> Result<String> {
        let mut url = Url::parse(base_url)?;
        let phrase = format!(
            "Flights from {} to {} on {} returning {}",
            self.origin, self.destination, self.depart_date, self.return_date
        );
        url.query_pairs_mut().append_pair("q", &phrase);
        Ok(url.to_string())
    }
}

fn validate_iata(code: &str, field: &str) -> Result<()> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(FlightError::InvalidQuery {
            reason: format!("{field} '{code}' is not a 3-letter IATA code"),
        })
    }
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| FlightError::InvalidQuery {
        reason: format!("invalid {field} '{value}', expected YYYY-MM-DD"),
    })
}
