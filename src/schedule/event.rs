use crate::time::{TimeDict, TimeParseError};

/// Time the user has blocked out, e.g. a job or a club meeting.
///
/// No section overlapping an event is ever chosen, and every generated
/// schedule carries the events it was generated around.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEvent", into = "RawEvent"))]
pub struct Event {
    days: String,
    title: String,
    time: TimeDict,
}

impl Event {
    /// Creates an event from a meeting string such as `"MoFr 1:00PM - 2:00PM"`.
    pub fn new(days: impl Into<String>, title: impl Into<String>) -> Result<Self, TimeParseError> {
        let days = days.into();
        let time = TimeDict::parse(&days)?;
        Ok(Self {
            days,
            title: title.into(),
            time,
        })
    }

    /// The meeting string, which doubles as the event's key.
    pub fn days(&self) -> &str {
        &self.days
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn time(&self) -> &TimeDict {
        &self.time
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawEvent {
    days: String,
    #[serde(default)]
    title: String,
}

#[cfg(feature = "serde")]
impl TryFrom<RawEvent> for Event {
    type Error = TimeParseError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        Event::new(raw.days, raw.title)
    }
}

#[cfg(feature = "serde")]
impl From<Event> for RawEvent {
    fn from(event: Event) -> Self {
        RawEvent {
            days: event.days,
            title: event.title,
        }
    }
}
