//! Generation timestamp shared by every timestamped field of a document

use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The single instant captured when a build starts.
///
/// Held at millisecond precision so the value embedded in dialog node ids
/// and the value written to `created`/`modified` always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationTimestamp(DateTime<Utc>);

impl GenerationTimestamp {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.trunc_subsecs(3))
    }

    /// Build from milliseconds since the Unix epoch
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Milliseconds since the Unix epoch
    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for GenerationTimestamp {
    // Same shape as a JavaScript `Date.toJSON()`: 2017-03-01T10:15:30.123Z
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for GenerationTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GenerationTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|instant| Self::from_datetime(instant.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let ts = GenerationTimestamp::from_millis(1_488_363_330_123).unwrap();
        assert_eq!(ts.to_string(), "2017-03-01T10:15:30.123Z");
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2017-03-01T10:15:30.123Z\"");
    }

    #[test]
    fn test_whole_seconds_keep_millis() {
        let ts = GenerationTimestamp::from_millis(1_488_363_330_000).unwrap();
        assert_eq!(ts.to_string(), "2017-03-01T10:15:30.000Z");
    }

    #[test]
    fn test_truncates_to_millis() {
        let instant = Utc.timestamp_opt(1_488_363_330, 123_456_789).unwrap();
        let ts = GenerationTimestamp::from_datetime(instant);
        assert_eq!(ts.millis(), 1_488_363_330_123);
        assert_eq!(ts.to_string(), "2017-03-01T10:15:30.123Z");
    }

    #[test]
    fn test_parse_back() {
        let ts = GenerationTimestamp::from_millis(1_488_363_330_123).unwrap();
        let parsed: GenerationTimestamp = serde_json::from_str("\"2017-03-01T10:15:30.123Z\"").unwrap();
        assert_eq!(parsed, ts);
    }
}
