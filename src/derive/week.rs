use chrono::{Datelike, NaiveDate};

/// How a date is bucketed into a reporting week. The two are not
/// interchangeable: each source-file variant is pinned to one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeekConvention {
    /// Weeks start on Sunday and the week holding January 1st is week 1
    /// (spreadsheet `WEEKNUM(date, 1)`). Rendered `Week {n}`.
    SundayStart,
    /// ISO-8601 week number. Rendered `Week {nn}`.
    Iso,
}

impl WeekConvention {
    pub fn week_number(&self, date: NaiveDate) -> u32 {
        match self {
            WeekConvention::SundayStart => {
                let lead = date
                    .with_ordinal(1)
                    .map(|jan1| jan1.weekday().num_days_from_sunday())
                    .unwrap_or(0);
                (date.ordinal0() + lead) / 7 + 1
            }
            WeekConvention::Iso => date.iso_week().week(),
        }
    }

    /// `""` for a missing date.
    pub fn label(&self, date: Option<NaiveDate>) -> String {
        let Some(date) = date else {
            return String::new();
        };
        let n = self.week_number(date);
        match self {
            WeekConvention::SundayStart => format!("Week {}", n),
            WeekConvention::Iso => format!("Week {:02}", n),
        }
    }
}
