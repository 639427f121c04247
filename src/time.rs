use chrono::prelude::{DateTime, Utc};
use std::time::SystemTime;

/// Formats a timestamp for archived game records.
pub fn iso8601(st: SystemTime) -> String {
    let dt: DateTime<Utc> = st.into();
    dt.format("%+").to_string()
}
