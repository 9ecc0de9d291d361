//! Card ⇄ meeting outcome propagation.

use tracing::{debug, info, warn};

use super::SyncOutcome;
use crate::board::Card;
use crate::error::KaizenError;
use crate::meeting::{find_meeting_mut, OutcomeCard};
use crate::workspace::Workspace;

/// Record a card's new location on the meeting that produced it.
///
/// Meetings are searched in order. The first meeting holding the card has
/// every copy of it updated (top-level and agenda-local) and the search stops
/// there; a card is assumed to originate from a single meeting.
pub fn sync_kanban_card_with_meeting(
    ws: &mut Workspace,
    card_id: &str,
    board_id: &str,
    column_id: &str,
) -> SyncOutcome {
    let result = ws.meetings.mutate(|meetings| {
        let meeting = meetings
            .iter_mut()
            .find(|m| m.references_card(card_id))
            .ok_or_else(|| KaizenError::CardNotFound(card_id.to_string()))?;

        let mut updated = 0;
        for outcome in meeting.all_outcomes_mut().filter(|o| o.card.id == card_id) {
            outcome.board_id = Some(board_id.to_string());
            outcome.column_id = Some(column_id.to_string());
            updated += 1;
        }
        Ok((meeting.id.clone(), updated))
    });

    match result {
        Ok((meeting_id, updated)) => {
            info!(card_id, meeting_id = %meeting_id, column_id, updated, "Synced card with meeting");
            SyncOutcome::success(
                format!("Updated {} outcome record(s) in meeting {}", updated, meeting_id),
                updated,
            )
        }
        Err(_) => {
            debug!(card_id, "Card is not a meeting outcome");
            SyncOutcome::failure(format!("No meeting references card {}", card_id))
        }
    }
}

/// File a card as an outcome of a meeting.
///
/// The bucket follows the card's category. A copy is appended to the
/// meeting's outcome list and, when `agenda_item_id` is given, another to
/// that agenda item. Both copies record the card's current board location and
/// drift once the card moves, until [`sync_kanban_card_with_meeting`] runs.
/// The card on the board is stamped with the meeting id as well.
pub fn add_kanban_card_to_meeting(
    ws: &mut Workspace,
    card: &Card,
    meeting_id: &str,
    agenda_item_id: Option<&str>,
) -> SyncOutcome {
    let Some(category) = card.category else {
        return KaizenError::UnknownCardType(card.id.clone()).into();
    };

    let location = ws.boards.find_card_by_id(&card.id);
    let mut copy = card.clone();
    copy.meeting_id = Some(meeting_id.to_string());
    let outcome = OutcomeCard {
        card: copy,
        board_id: location.as_ref().map(|l| l.board_id.clone()),
        column_id: location.as_ref().map(|l| l.column_id.clone()),
    };

    let result = ws.meetings.mutate(|meetings| {
        let meeting = find_meeting_mut(meetings, meeting_id)?;
        meeting.outcomes.bucket_mut(category).push(outcome.clone());

        if let Some(item_id) = agenda_item_id {
            let item = meeting
                .agenda
                .iter_mut()
                .find(|a| a.id == item_id)
                .ok_or_else(|| KaizenError::AgendaItemNotFound(item_id.to_string()))?;
            item.outcomes.bucket_mut(category).push(outcome.clone());
        }
        Ok(())
    });

    match result {
        Ok(()) => {
            if location.is_some() {
                if let Err(e) = ws.boards.set_card_meeting(&card.id, meeting_id) {
                    warn!(card_id = %card.id, error = %e, "Failed to stamp meeting on card");
                }
            }
            info!(card_id = %card.id, meeting_id, category = category.as_str(), "Added card to meeting");
            SyncOutcome::success(
                format!("Added {} {} to meeting {}", category.as_str(), card.id, meeting_id),
                1,
            )
        }
        Err(e) => e.into(),
    }
}
