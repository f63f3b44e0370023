use chrono::NaiveDate;

const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Day/month/year, as shown next to a task.
#[must_use]
pub fn format_date_br(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Value for an `<input type="date">`.
#[must_use]
pub fn format_date_input(value: NaiveDate) -> String {
    value.format(INPUT_FORMAT).to_string()
}

/// Parse a date input value; blank or malformed input means no date.
#[must_use]
pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, INPUT_FORMAT).ok()
}
