use chrono::{DateTime, TimeZone, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn now_timestamp() -> i64 {
    now().timestamp()
}

pub fn to_rfc3339(ts: i64) -> String {
    match Utc.timestamp_opt(ts, 0).single() {
        Some(dt) => dt.to_rfc3339(),
        None => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_unix_seconds() {
        assert_eq!(to_rfc3339(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(to_rfc3339(i64::MAX), i64::MAX.to_string());
    }
}
