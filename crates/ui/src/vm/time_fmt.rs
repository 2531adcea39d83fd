use chrono::NaiveDate;

/// `Due: 14 Nov 2023`, or a neutral label when the backend sent no date.
#[must_use]
pub fn format_due(due: Option<NaiveDate>) -> String {
    due.map_or_else(
        || "No due date".to_owned(),
        |date| format!("Due: {}", date.format("%d %b %Y")),
    )
}

#[must_use]
pub fn format_week(week: Option<u32>) -> Option<String> {
    week.map(|week| format!("Week {week}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_label_uses_day_month_year() {
        assert_eq!(
            format_due(NaiveDate::from_ymd_opt(2023, 11, 4)),
            "Due: 04 Nov 2023"
        );
        assert_eq!(format_due(None), "No due date");
    }
}
