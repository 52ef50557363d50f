use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::DashboardError;

const MONTHS_DE: [&str; 12] = [
    "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Language of axis labels, month names and number formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
}

impl Locale {
    /// Suffixes for billions, millions and thousands
    pub fn magnitude_suffixes(&self) -> [&'static str; 3] {
        match self {
            Locale::En => [" Bn", " M", " K"],
            Locale::De => [" Mrd", " Mio", " K"],
        }
    }

    /// Short month name for a 1-based month, `None` outside 1..=12
    pub fn month_label(&self, month: u32) -> Option<&'static str> {
        let table = match self {
            Locale::En => &MONTHS_EN,
            Locale::De => &MONTHS_DE,
        };
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        table.get(index).copied()
    }

    pub fn thousands_separator(&self) -> char {
        match self {
            Locale::En => ',',
            Locale::De => '.',
        }
    }

    /// Whole-number rendering with thousands separators, e.g. `1.234.567` for De
    pub fn format_full(&self, value: f64) -> String {
        let rounded = format!("{:.0}", value.abs());
        let sep = self.thousands_separator();
        let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
        for (i, ch) in rounded.chars().enumerate() {
            if i > 0 && (rounded.len() - i) % 3 == 0 {
                grouped.push(sep);
            }
            grouped.push(ch);
        }
        if value < 0.0 && rounded != "0" {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::De => f.write_str("de"),
        }
    }
}

impl FromStr for Locale {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "de" | "deutsch" | "german" => Ok(Locale::De),
            other => Err(DashboardError::InvalidArgument(format!("unknown locale '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_labels() {
        assert_eq!(Locale::De.month_label(3), Some("Mär"));
        assert_eq!(Locale::En.month_label(12), Some("Dec"));
        assert_eq!(Locale::De.month_label(0), None);
        assert_eq!(Locale::De.month_label(13), None);
    }

    #[test]
    fn test_format_full_groups_digits() {
        assert_eq!(Locale::De.format_full(1_234_567.4), "1.234.567");
        assert_eq!(Locale::En.format_full(200e9), "200,000,000,000");
        assert_eq!(Locale::En.format_full(999.0), "999");
        assert_eq!(Locale::En.format_full(0.0), "0");
    }
}
