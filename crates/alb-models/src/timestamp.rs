use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire timestamp: seconds since the UNIX epoch plus a microsecond part.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeStamp {
  pub secs: Option<u64>,
  pub usecs: Option<u64>,
}

impl TimeStamp {
  /// Convert to a UTC datetime. Returns `None` when `secs` is absent or out
  /// of chrono's representable range; an absent `usecs` is treated as zero.
  #[must_use]
  pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(self.secs?).ok()?;
    let nanos = u32::try_from(self.usecs.unwrap_or(0).checked_mul(1_000)?).ok()?;
    DateTime::from_timestamp(secs, nanos)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_to_datetime() {
    let ts = TimeStamp {
      secs: Some(1_700_000_000),
      usecs: Some(250_000),
    };
    let dt = ts.to_datetime().unwrap();

    assert_eq!(dt.timestamp(), 1_700_000_000);
    assert_eq!(dt.timestamp_subsec_micros(), 250_000);
  }

  #[test]
  fn test_to_datetime_absent_secs() {
    let ts = TimeStamp {
      secs: None,
      usecs: Some(1),
    };

    assert!(ts.to_datetime().is_none());
  }

  #[test]
  fn test_absent_fields_not_serialized() {
    let ts = TimeStamp::default();
    let json = serde_json::to_string(&ts).unwrap();

    assert_eq!(json, "{}");
  }
}
