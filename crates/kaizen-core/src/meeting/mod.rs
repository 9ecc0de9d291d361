//! Meeting collection.

pub mod model;

pub use model::{AgendaItem, Meeting, MeetingUpdate, OutcomeCard, Outcomes};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{KaizenError, KaizenResult};

/// In-memory collection of meetings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingStore {
    meetings: Vec<Meeting>,
}

impl MeetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn get_meeting(&self, id: &str) -> Option<&Meeting> {
        self.meetings.iter().find(|m| m.id == id)
    }

    pub(crate) fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut Vec<Meeting>) -> KaizenResult<T>,
    ) -> KaizenResult<T> {
        let mut next = self.meetings.clone();
        let value = f(&mut next)?;
        self.meetings = next;
        Ok(value)
    }

    pub fn create_meeting(&mut self, title: &str, date: Option<&str>) -> Meeting {
        let meeting = Meeting {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            date: date.map(str::to_string),
            agenda: Vec::new(),
            outcomes: Outcomes::default(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let mut next = self.meetings.clone();
        next.push(meeting.clone());
        self.meetings = next;
        debug!(meeting_id = %meeting.id, title, "Created meeting");
        meeting
    }

    pub fn add_agenda_item(&mut self, meeting_id: &str, title: &str) -> KaizenResult<AgendaItem> {
        self.mutate(|meetings| {
            let meeting = find_meeting_mut(meetings, meeting_id)?;
            let item = AgendaItem {
                id: Uuid::new_v4().to_string(),
                title: title.to_string(),
                outcomes: Outcomes::default(),
            };
            meeting.agenda.push(item.clone());
            Ok(item)
        })
    }

    /// Apply a partial update.
    pub fn update_meeting(&mut self, id: &str, update: MeetingUpdate) -> KaizenResult<Meeting> {
        self.mutate(|meetings| {
            let meeting = find_meeting_mut(meetings, id)?;
            if let Some(title) = update.title {
                meeting.title = title;
            }
            if update.date.is_some() {
                meeting.date = update.date;
            }
            if let Some(agenda) = update.agenda {
                meeting.agenda = agenda;
            }
            if let Some(outcomes) = update.outcomes {
                meeting.outcomes = outcomes;
            }
            debug!(meeting_id = id, "Updated meeting");
            Ok(meeting.clone())
        })
    }

    pub fn delete_meeting(&mut self, id: &str) -> KaizenResult<Meeting> {
        self.mutate(|meetings| {
            let index = meetings
                .iter()
                .position(|m| m.id == id)
                .ok_or_else(|| KaizenError::MeetingNotFound(id.to_string()))?;
            Ok(meetings.remove(index))
        })
    }
}

pub(crate) fn find_meeting_mut<'a>(meetings: &'a mut [Meeting], id: &str) -> KaizenResult<&'a mut Meeting> {
    meetings
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| KaizenError::MeetingNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_update_meeting() {
        let mut store = MeetingStore::new();
        let m = store.create_meeting("Weekly gemba", Some("2026-10-19"));
        let item = store.add_agenda_item(&m.id, "Scrap rate").unwrap();

        let updated = store
            .update_meeting(
                &m.id,
                MeetingUpdate {
                    title: Some("Weekly gemba walk".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Weekly gemba walk");
        assert_eq!(updated.date.as_deref(), Some("2026-10-19"));
        assert!(updated.agenda_item(&item.id).is_some());
    }

    #[test]
    fn test_missing_meeting() {
        let mut store = MeetingStore::new();
        assert!(matches!(
            store.add_agenda_item("ghost", "x"),
            Err(KaizenError::MeetingNotFound(_))
        ));
        assert!(store.delete_meeting("ghost").is_err());
        assert!(store.meetings().is_empty());
    }
}
