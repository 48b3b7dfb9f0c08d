//! An ASCII "cyber pet" for the profile README.
//!
//! The pet is fed by pushes: it is happy when something was pushed today,
//! hungry otherwise, and evolves after a streak of five days.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Deserialize;

/// Marker opening the pet block in the README.
pub const PET_START: &str = "<!-- CYBER_PET_START -->";
/// Marker closing the pet block in the README.
pub const PET_END: &str = "<!-- CYBER_PET_END -->";

/// Streak length at which the pet evolves.
pub const EVOLVE_STREAK: u32 = 5;

/// Experience cap.
pub const MAX_XP: u32 = 1000;

const XP_PER_DAY: u32 = 100;

/// The subset of a GitHub user event the pet cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivityEvent {
    /// Event type, e.g. `PushEvent`.
    #[serde(rename = "type")]
    pub kind: String,
    /// When the event happened.
    pub created_at: DateTime<Utc>,
}

/// UTC days on which at least one push happened.
#[must_use]
pub fn push_dates(events: &[ActivityEvent]) -> BTreeSet<NaiveDate> {
    events
        .iter()
        .filter(|e| e.kind == "PushEvent")
        .map(|e| e.created_at.date_naive())
        .collect()
}

/// Consecutive active days ending today.
///
/// A day without a push today means the streak is broken, even if
/// yesterday was active.
#[must_use]
pub fn streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut count = 0;
    let mut day = Some(today);
    while let Some(d) = day.filter(|d| dates.contains(d)) {
        count += 1;
        day = d.checked_sub_days(Days::new(1));
    }
    count
}

/// How the pet feels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Hungry,
    Evolved,
}

impl Mood {
    /// ASCII art for the mood.
    #[must_use]
    pub fn art(&self) -> &'static str {
        match self {
            Mood::Happy => concat!(
                "      ^ ◡ ^\n",
                "    (  o.o  )\n",
                "     >  ^  <\n",
            ),
            Mood::Hungry => concat!(
                "      - _ -\n",
                "    (  T.T  )\n",
                "     >  ^  <\n",
            ),
            Mood::Evolved => concat!(
                "      🔥 0_0 🔥\n",
                "     /[__] \\\n",
                "      ]   [\n",
            ),
        }
    }

    /// What the pet says.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Mood::Happy => "Yummy code! I'm full and happy! 🟢",
            Mood::Hungry => "I'm starving... feed me commits! 🔴",
            Mood::Evolved => "ON FIRE! 5+ Day Streak! 🟣",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Happy => write!(f, "Happy"),
            Mood::Hungry => write!(f, "Hungry"),
            Mood::Evolved => write!(f, "Evolved"),
        }
    }
}

/// The pet's condition on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetStatus {
    pub fed_today: bool,
    pub streak: u32,
    pub mood: Mood,
    pub xp: u32,
}

impl PetStatus {
    /// Computes the pet's condition from the days with pushes.
    #[must_use]
    pub fn from_dates(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> Self {
        let fed_today = dates.contains(&today);
        let streak = streak(dates, today);
        let mood = match (fed_today, streak) {
            (true, s) if s >= EVOLVE_STREAK => Mood::Evolved,
            (true, _) => Mood::Happy,
            (false, _) => Mood::Hungry,
        };

        Self {
            fed_today,
            streak,
            mood,
            xp: (streak * XP_PER_DAY).min(MAX_XP),
        }
    }

    /// Computes the pet's condition straight from events.
    #[must_use]
    pub fn from_events(events: &[ActivityEvent], today: NaiveDate) -> Self {
        Self::from_dates(&push_dates(events), today)
    }

    /// The README block, markers included.
    #[must_use]
    pub fn render_block(&self, name: &str) -> String {
        format!(
            "{PET_START}\n\
             ### 👾 Cyber Pet\n\
             ```text\n\
             {art}```\n\
             **Name**: {name}\n\
             **Mood**: {mood}\n\
             **Status**: {status}\n\
             **Streak**: {streak} days\n\
             **XP**: {xp} / {MAX_XP}\n\
             {PET_END}",
            art = self.mood.art(),
            mood = self.mood,
            status = self.mood.status(),
            streak = self.streak,
            xp = self.xp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dates(days: &[NaiveDate]) -> BTreeSet<NaiveDate> {
        days.iter().copied().collect()
    }

    #[test]
    fn test_parse_events() {
        let json = r#"[
            {"id": "1", "type": "PushEvent", "created_at": "2023-10-26T10:30:00Z", "repo": {"name": "x/y"}},
            {"id": "2", "type": "WatchEvent", "created_at": "2023-10-25T09:00:00Z"},
            {"id": "3", "type": "PushEvent", "created_at": "2023-10-26T23:59:59Z"},
            {"id": "4", "type": "PushEvent", "created_at": "2023-10-24T00:00:01Z"}
        ]"#;
        let events: Vec<ActivityEvent> = serde_json::from_str(json).unwrap();

        let pushes = push_dates(&events);

        assert_eq!(pushes, dates(&[day(2023, 10, 24), day(2023, 10, 26)]));
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let active = dates(&[
            day(2024, 3, 1),
            day(2024, 2, 29),
            day(2024, 2, 28),
            day(2024, 2, 26),
        ]);
        assert_eq!(streak(&active, day(2024, 3, 1)), 3);
    }

    #[test]
    fn test_streak_zero_when_not_fed_today() {
        let active = dates(&[day(2024, 3, 1), day(2024, 2, 29)]);
        assert_eq!(streak(&active, day(2024, 3, 2)), 0);
    }

    #[test]
    fn test_hungry_pet() {
        let status = PetStatus::from_dates(&BTreeSet::new(), day(2024, 1, 1));
        assert_eq!(status.mood, Mood::Hungry);
        assert!(!status.fed_today);
        assert_eq!(status.xp, 0);
    }

    #[test]
    fn test_happy_pet() {
        let today = day(2024, 1, 10);
        let status = PetStatus::from_dates(&dates(&[today, day(2024, 1, 9)]), today);
        assert_eq!(status.mood, Mood::Happy);
        assert_eq!(status.streak, 2);
        assert_eq!(status.xp, 200);
    }

    #[test]
    fn test_evolved_pet_and_xp_cap() {
        let today = day(2024, 1, 31);
        let active: BTreeSet<NaiveDate> = (0..12)
            .map(|n| today.checked_sub_days(Days::new(n)).unwrap())
            .collect();

        let status = PetStatus::from_dates(&active, today);

        assert_eq!(status.mood, Mood::Evolved);
        assert_eq!(status.streak, 12);
        assert_eq!(status.xp, MAX_XP);
    }

    #[test]
    fn test_exactly_five_days_evolves() {
        let today = day(2024, 6, 5);
        let active: BTreeSet<NaiveDate> = (1..=5).map(|d| day(2024, 6, d)).collect();
        assert_eq!(PetStatus::from_dates(&active, today).mood, Mood::Evolved);
    }

    #[test]
    fn test_render_block() {
        let today = day(2024, 1, 10);
        let block = PetStatus::from_dates(&dates(&[today]), today).render_block("Git-Zilla");

        assert!(block.starts_with(PET_START));
        assert!(block.ends_with(PET_END));
        assert!(block.contains("**Name**: Git-Zilla"));
        assert!(block.contains("**Mood**: Happy"));
        assert!(block.contains("**Streak**: 1 days"));
        assert!(block.contains("**XP**: 100 / 1000"));
        assert!(block.contains("(  o.o  )"));
        assert!(block.contains("```text\n"));
    }
}
