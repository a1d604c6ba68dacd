use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::America::New_York;
use services::AuthSession;

/// Colour scheme of the shell. Lives only for the current window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Theme::Dark => "theme-dark",
            Theme::Light => "theme-light",
        }
    }

    /// Label of the toggle, naming the theme it switches to.
    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light mode",
            Theme::Light => "Dark mode",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopbarVm {
    pub display_name: String,
    pub initials: String,
}

#[must_use]
pub fn map_topbar(session: &AuthSession) -> TopbarVm {
    let initials = session
        .display_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    TopbarVm {
        display_name: session.display_name.clone(),
        initials,
    }
}

/// Regular US equity session in New York local minutes, `[open, close)`.
const MARKET_OPEN_MINUTE: u32 = 9 * 60 + 30;
const MARKET_CLOSE_MINUTE: u32 = 16 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketStatus {
    Open,
    Closed,
}

impl MarketStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MarketStatus::Open => "MARKET OPEN",
            MarketStatus::Closed => "MARKET CLOSED",
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            MarketStatus::Open => "market-dot open",
            MarketStatus::Closed => "market-dot closed",
        }
    }
}

/// Open on weekdays from 9:30 to 16:00 New York time. Holidays are ignored.
#[must_use]
pub fn market_status(now: DateTime<Utc>) -> MarketStatus {
    let local = now.with_timezone(&New_York);
    let weekday = !matches!(local.weekday(), Weekday::Sat | Weekday::Sun);
    let minute = local.hour() * 60 + local.minute();
    if weekday && (MARKET_OPEN_MINUTE..MARKET_CLOSE_MINUTE).contains(&minute) {
        MarketStatus::Open
    } else {
        MarketStatus::Closed
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketClockVm {
    pub status: MarketStatus,
    /// Short weekday, e.g. `TUE`.
    pub day: String,
    /// e.g. `NOV . 14 . 2023`.
    pub date: String,
}

#[must_use]
pub fn map_market_clock(now: DateTime<Utc>) -> MarketClockVm {
    let local = now.with_timezone(&New_York);
    MarketClockVm {
        status: market_status(now),
        day: local.format("%a").to_string().to_uppercase(),
        date: local.format("%b . %d . %Y").to_string().to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use services::clock::fixed_clock;

    fn new_york(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        New_York
            .with_ymd_and_hms(y, m, d, hour, minute, 0)
            .single()
            .expect("unambiguous New York time")
            .with_timezone(&Utc)
    }

    #[test]
    fn market_opens_at_half_past_nine_and_closes_at_four() {
        // Friday 2024-03-08.
        assert_eq!(market_status(new_york(2024, 3, 8, 9, 29)), MarketStatus::Closed);
        assert_eq!(market_status(new_york(2024, 3, 8, 9, 30)), MarketStatus::Open);
        assert_eq!(market_status(new_york(2024, 3, 8, 15, 59)), MarketStatus::Open);
        assert_eq!(market_status(new_york(2024, 3, 8, 16, 0)), MarketStatus::Closed);
    }

    #[test]
    fn market_is_closed_on_weekends() {
        assert_eq!(market_status(new_york(2024, 3, 9, 11, 0)), MarketStatus::Closed);
        assert_eq!(market_status(new_york(2024, 3, 10, 14, 0)), MarketStatus::Closed);
    }

    #[test]
    fn opening_bell_follows_daylight_saving() {
        // Before the switch 9:30 EST is 14:30 UTC; after it 9:30 EDT is 13:30 UTC.
        let before = Utc.with_ymd_and_hms(2024, 3, 8, 13, 30, 0).single().expect("utc");
        let after = Utc.with_ymd_and_hms(2024, 3, 11, 13, 30, 0).single().expect("utc");
        assert_eq!(market_status(before), MarketStatus::Closed);
        assert_eq!(market_status(after), MarketStatus::Open);
        assert_eq!(market_status(new_york(2024, 3, 11, 9, 30)), MarketStatus::Open);
    }

    #[test]
    fn market_clock_labels_use_new_york_date() {
        // 2023-11-14T22:13:20Z is 17:13 EST on a Tuesday.
        let vm = map_market_clock(fixed_clock().now());
        assert_eq!(vm.status, MarketStatus::Closed);
        assert_eq!(vm.status.label(), "MARKET CLOSED");
        assert_eq!(vm.day, "TUE");
        assert_eq!(vm.date, "NOV . 14 . 2023");

        // 01:00 UTC on Wednesday is still Tuesday evening in New York.
        let late = Utc.with_ymd_and_hms(2023, 11, 15, 1, 0, 0).single().expect("utc");
        assert_eq!(map_market_clock(late).day, "TUE");
    }

    #[test]
    fn theme_toggles_back_and_forth() {
        let theme = Theme::default();
        assert_eq!(theme.class(), "theme-dark");
        assert_eq!(theme.toggled().class(), "theme-light");
        assert_eq!(theme.toggled().toggled(), theme);
    }

    #[test]
    fn topbar_uses_display_name_initials() {
        let session = AuthSession {
            user_id: "local:ada".into(),
            email: None,
            display_name: "ada lovelace".into(),
            signed_in_at: fixed_clock().now(),
        };
        let vm = map_topbar(&session);
        assert_eq!(vm.display_name, "ada lovelace");
        assert_eq!(vm.initials, "AL");
    }
}
