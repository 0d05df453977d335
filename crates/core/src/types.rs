/// All primary keys are UUID v4 strings, exposed on the wire as `_id`.
pub type DbId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
