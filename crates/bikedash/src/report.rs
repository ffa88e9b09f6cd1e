//! Plain-text dashboard report.

use bikedash_common::format_count;
use bikedash_graphs::DashboardSnapshot;
use std::fmt;

/// Title, metric badges, date range and footer of one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DashboardReport<'a> {
    /// Heading line.
    pub title: &'a str,
    /// Optional last line.
    pub footer: Option<&'a str>,
    /// Snapshot the badges and range come from.
    pub snapshot: &'a DashboardSnapshot,
}

impl fmt::Display for DashboardReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.snapshot.summary;
        let badges = [
            ("Casual Users", format_count(summary.casual_total)),
            ("Registered Users", format_count(summary.registered_total)),
            ("Total Users", format_count(summary.grand_total)),
        ];
        let label_width = badges.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        let value_width = badges.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        writeln!(f)?;

        for (label, value) in &badges {
            writeln!(f, "{label:<label_width$}  {value:>value_width$}")?;
        }
        writeln!(f)?;

        let requested = self.snapshot.requested;
        match self.snapshot.effective {
            Some(effective) if effective == requested => writeln!(f, "Date range: {effective}")?,
            Some(effective) => writeln!(f, "Date range: {effective} (requested {requested})")?,
            None => writeln!(f, "Date range: {requested} (no data in this range)")?,
        }

        if let Some(footer) = self.footer {
            writeln!(f)?;
            writeln!(f, "{footer}")?;
        }
        Ok(())
    }
}

/// Renders the title, metric badges, date range and footer as text.
pub fn render_report(title: &str, footer: Option<&str>, snapshot: &DashboardSnapshot) -> String {
    DashboardReport {
        title,
        footer,
        snapshot,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikedash_common::test_utils::record_fixtures::{
        sample_daily_records, sample_hourly_records,
    };
    use bikedash_common::test_utils::ymd;
    use bikedash_common::DateInterval;
    use bikedash_graphs::{DashboardPipeline, PipelineOptions, RecordStore};

    fn store() -> RecordStore {
        RecordStore::new(sample_daily_records(), sample_hourly_records())
    }

    #[test]
    fn test_full_report() {
        let store = store();
        let snapshot = DashboardPipeline::new(&store, PipelineOptions::default())
            .compute_full_range()
            .unwrap();

        let report = render_report("Bike Rental Dashboard", Some("Data: UCI"), &snapshot);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Bike Rental Dashboard");
        assert_eq!(lines[1], "=====================");
        assert_eq!(lines[3], "Casual Users       3,487");
        assert_eq!(lines[4], "Registered Users  13,122");
        assert_eq!(lines[5], "Total Users       16,609");
        assert_eq!(lines[7], "Date range: 2011-01-01 to 2012-12-31");
        assert_eq!(lines.last(), Some(&"Data: UCI"));
    }

    #[test]
    fn test_clamped_and_empty_ranges() {
        let store = store();
        let pipeline = DashboardPipeline::new(&store, PipelineOptions::default());

        let wide = DateInterval::new(ymd(2010, 1, 1), ymd(2011, 1, 31)).unwrap();
        let report = render_report("T", None, &pipeline.compute(wide).unwrap());
        assert!(report.contains("Date range: 2011-01-01 to 2011-01-31 (requested 2010-01-01 to 2011-01-31)"));

        let outside = DateInterval::new(ymd(2015, 1, 1), ymd(2015, 1, 2)).unwrap();
        let report = render_report("T", None, &pipeline.compute(outside).unwrap());
        assert!(report.contains("(no data in this range)"));
        assert!(report
            .lines()
            .any(|line| line.starts_with("Total Users") && line.ends_with(" 0")));
    }

    /// Accepts a fixed number of bytes, then fails.
    struct LimitedWriter {
        written: String,
        capacity: usize,
    }

    impl fmt::Write for LimitedWriter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            if self.written.len() + s.len() > self.capacity {
                return Err(fmt::Error);
            }
            self.written.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_stops_report() {
        use std::fmt::Write as _;

        let store = store();
        let snapshot = DashboardPipeline::new(&store, PipelineOptions::default())
            .compute_full_range()
            .unwrap();
        let report = DashboardReport {
            title: "Bike Rental Dashboard",
            footer: Some("Data: UCI"),
            snapshot: &snapshot,
        };

        let mut writer = LimitedWriter {
            written: String::new(),
            capacity: 30,
        };
        assert!(write!(writer, "{report}").is_err());
        assert!(!writer.written.contains("Casual Users"));

        let mut roomy = LimitedWriter {
            written: String::new(),
            capacity: 4096,
        };
        write!(roomy, "{report}").unwrap();
        assert_eq!(roomy.written, render_report("Bike Rental Dashboard", Some("Data: UCI"), &snapshot));
    }
}
