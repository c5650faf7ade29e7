use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Past,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SocietyEvent {
    /// Free-form, e.g. `Aug 25-31, 2025` or `Summer 2025`.
    pub date: String,
    pub name: String,
    pub description: String,
    pub participation: String,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    NextEvent,
    Upcoming,
    Completed,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::NextEvent => "Next Event!",
            Badge::Upcoming => "Upcoming",
            Badge::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug)]
pub struct TimelineEntry<'a> {
    pub event: &'a SocietyEvent,
    pub side: Side,
    pub badge: Badge,
}

/// Alternating timeline. The first upcoming event is the next one.
pub fn timeline(events: &[SocietyEvent]) -> Vec<TimelineEntry<'_>> {
    let next = events.iter().position(|e| e.status == Status::Upcoming);
    events
        .iter()
        .enumerate()
        .map(|(i, event)| TimelineEntry {
            event,
            side: if i % 2 == 0 { Side::Left } else { Side::Right },
            badge: match event.status {
                Status::Past => Badge::Completed,
                Status::Upcoming if Some(i) == next => Badge::NextEvent,
                Status::Upcoming => Badge::Upcoming,
            },
        })
        .collect()
}

pub fn load_events(path: &Path) -> anyhow::Result<Vec<SocietyEvent>> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, status: Status) -> SocietyEvent {
        SocietyEvent {
            date: "Jan 1, 2026".to_string(),
            name: name.to_string(),
            description: String::new(),
            participation: String::new(),
            status,
        }
    }

    #[test]
    fn marks_first_upcoming_and_alternates_sides() {
        let events = vec![
            event("a", Status::Past),
            event("b", Status::Upcoming),
            event("c", Status::Upcoming),
        ];
        let entries = timeline(&events);
        let badges: Vec<_> = entries.iter().map(|e| e.badge).collect();
        assert_eq!(badges, [Badge::Completed, Badge::NextEvent, Badge::Upcoming]);
        let sides: Vec<_> = entries.iter().map(|e| e.side).collect();
        assert_eq!(sides, [Side::Left, Side::Right, Side::Left]);
    }

    #[test]
    fn status_reads_lowercase() {
        let json = r#"{"date":"Sep 08, 2025","name":"n","description":"d",
            "participation":"p","status":"upcoming"}"#;
        let e: SocietyEvent = serde_json::from_str(json).unwrap();
        assert_eq!(e.status, Status::Upcoming);
    }
}
