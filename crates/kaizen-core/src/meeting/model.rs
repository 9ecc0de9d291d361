//! Meeting domain models.

use serde::{Deserialize, Serialize};

use crate::board::model::{Card, CardCategory};

/// A meeting whose agenda discussions produce cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    #[serde(default)]
    pub agenda: Vec<AgendaItem>,
    #[serde(default)]
    pub outcomes: Outcomes,
    pub created_at: String,
}

impl Meeting {
    pub fn agenda_item(&self, id: &str) -> Option<&AgendaItem> {
        self.agenda.iter().find(|a| a.id == id)
    }

    /// Whether any outcome list, top-level or agenda-local, holds `card_id`.
    pub fn references_card(&self, card_id: &str) -> bool {
        self.outcomes.contains(card_id) || self.agenda.iter().any(|a| a.outcomes.contains(card_id))
    }

    /// Every outcome copy in this meeting, top-level lists first.
    pub fn all_outcomes(&self) -> impl Iterator<Item = &OutcomeCard> {
        self.outcomes
            .iter()
            .chain(self.agenda.iter().flat_map(|a| a.outcomes.iter()))
    }

    pub(crate) fn all_outcomes_mut(&mut self) -> impl Iterator<Item = &mut OutcomeCard> {
        self.outcomes
            .iter_mut()
            .chain(self.agenda.iter_mut().flat_map(|a| a.outcomes.iter_mut()))
    }
}

/// One discussion point of a meeting with its own snapshot of outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub outcomes: Outcomes,
}

/// Cards that came out of a meeting, bucketed by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outcomes {
    #[serde(default)]
    pub tasks: Vec<OutcomeCard>,
    #[serde(default)]
    pub problems: Vec<OutcomeCard>,
    #[serde(default)]
    pub ideas: Vec<OutcomeCard>,
}

impl Outcomes {
    pub fn bucket(&self, category: CardCategory) -> &Vec<OutcomeCard> {
        match category {
            CardCategory::Task => &self.tasks,
            CardCategory::Problem => &self.problems,
            CardCategory::Idea => &self.ideas,
        }
    }

    pub fn bucket_mut(&mut self, category: CardCategory) -> &mut Vec<OutcomeCard> {
        match category {
            CardCategory::Task => &mut self.tasks,
            CardCategory::Problem => &mut self.problems,
            CardCategory::Idea => &mut self.ideas,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutcomeCard> {
        self.tasks.iter().chain(&self.problems).chain(&self.ideas)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut OutcomeCard> {
        self.tasks
            .iter_mut()
            .chain(self.problems.iter_mut())
            .chain(self.ideas.iter_mut())
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.iter().any(|o| o.card.id == card_id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len() + self.problems.len() + self.ideas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Denormalized copy of a card plus the location it was last known at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeCard {
    #[serde(flatten)]
    pub card: Card,
    pub board_id: Option<String>,
    pub column_id: Option<String>,
}

/// Partial meeting update. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct MeetingUpdate {
    pub title: Option<String>,
    pub date: Option<String>,
    pub agenda: Option<Vec<AgendaItem>>,
    pub outcomes: Option<Outcomes>,
}
