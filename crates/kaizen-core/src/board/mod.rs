//! Board Store: the canonical owner of card content and location.
//!
//! Every mutation builds the next board collection from the current one and
//! swaps it in only when all lookups succeeded, so an `Err` always means the
//! store is unchanged.

pub mod model;

pub use model::{
    board_id, column_id, default_columns, Board, BoardCategory, Card, CardCategory,
    CardLocation, CardUpdate, Column, NewCard, Priority,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{KaizenError, KaizenResult};

/// In-memory collection of department boards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardStore {
    boards: Vec<Board>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All boards in creation order.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn get_board(&self, board_id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    /// Locate a card on any board.
    pub fn find_card_by_id(&self, card_id: &str) -> Option<CardLocation> {
        self.boards.iter().find_map(|board| {
            board.columns.iter().find_map(|column| {
                column.card(card_id).map(|card| CardLocation {
                    board_id: board.id.clone(),
                    column_id: column.id.clone(),
                    card: card.clone(),
                })
            })
        })
    }

    /// Create a board if no board with this id exists.
    ///
    /// Returns `false` (and changes nothing) when the board already exists;
    /// this cannot be used to reset a board.
    pub fn initialize_board(
        &mut self,
        board_id: &str,
        category: BoardCategory,
        department_id: &str,
        columns: Vec<Column>,
    ) -> bool {
        if self.get_board(board_id).is_some() {
            debug!(board_id, "Board already initialized");
            return false;
        }

        let mut next = self.boards.clone();
        next.push(Board {
            id: board_id.to_string(),
            category,
            department_id: department_id.to_string(),
            columns,
        });
        self.boards = next;
        debug!(board_id, %category, department_id, "Initialized board");
        true
    }

    /// Lazily create the three default boards of a department.
    ///
    /// Returns the ids of the boards that were created by this call.
    pub fn ensure_department_boards(&mut self, department_id: &str, locale: &str) -> Vec<String> {
        BoardCategory::ALL
            .iter()
            .filter_map(|category| {
                let id = board_id(department_id, *category);
                let columns = default_columns(department_id, *category, locale);
                self.initialize_board(&id, *category, department_id, columns)
                    .then_some(id)
            })
            .collect()
    }

    /// Apply `f` to a copy of the collection and keep the copy only on success.
    fn mutate<T>(&mut self, f: impl FnOnce(&mut Vec<Board>) -> KaizenResult<T>) -> KaizenResult<T> {
        let mut next = self.boards.clone();
        let value = f(&mut next)?;
        self.boards = next;
        Ok(value)
    }

    /// Add a card at the end of a column.
    ///
    /// The card inherits the board's department and category unless the
    /// caller overrides them.
    pub fn add_card(&mut self, board_id: &str, column_id: &str, new: NewCard) -> KaizenResult<Card> {
        self.mutate(|boards| {
            let board = find_board_mut(boards, board_id)?;
            let department_id = new
                .department_id
                .unwrap_or_else(|| board.department_id.clone());
            let category = new.category.unwrap_or_else(|| board.category.card_category());

            let card = Card {
                id: uuid::Uuid::new_v4().to_string(),
                title: new.title,
                description: new.description,
                assignee: new.assignee,
                due_date: new.due_date,
                priority: new.priority,
                department_id: Some(department_id),
                category: Some(category),
                meeting_id: new.meeting_id,
                created_at: chrono::Utc::now().to_rfc3339(),
            };

            let column = find_column_mut(board, column_id)?;
            column.cards.push(card.clone());
            debug!(board_id, column_id, card_id = %card.id, "Added card");
            Ok(card)
        })
    }

    /// Update a card's details in place.
    pub fn update_card(
        &mut self,
        board_id: &str,
        column_id: &str,
        card_id: &str,
        update: CardUpdate,
    ) -> KaizenResult<Card> {
        self.mutate(|boards| {
            let board = find_board_mut(boards, board_id)?;
            let column = find_column_mut(board, column_id)?;
            let card = column
                .cards
                .iter_mut()
                .find(|c| c.id == card_id)
                .ok_or_else(|| KaizenError::CardNotFound(card_id.to_string()))?;

            if let Some(title) = update.title {
                card.title = title;
            }
            if update.description.is_some() {
                card.description = update.description;
            }
            if update.assignee.is_some() {
                card.assignee = update.assignee;
            }
            if update.due_date.is_some() {
                card.due_date = update.due_date;
            }
            if update.priority.is_some() {
                card.priority = update.priority;
            }
            debug!(board_id, column_id, card_id, "Updated card");
            Ok(card.clone())
        })
    }

    /// Record the meeting a card came out of, wherever the card lives.
    pub fn set_card_meeting(&mut self, card_id: &str, meeting_id: &str) -> KaizenResult<()> {
        self.mutate(|boards| {
            let card = boards
                .iter_mut()
                .flat_map(|b| b.columns.iter_mut())
                .flat_map(|c| c.cards.iter_mut())
                .find(|c| c.id == card_id)
                .ok_or_else(|| KaizenError::CardNotFound(card_id.to_string()))?;
            card.meeting_id = Some(meeting_id.to_string());
            debug!(card_id, meeting_id, "Linked card to meeting");
            Ok(())
        })
    }

    /// Delete a card. Project and meeting references to it are left dangling.
    pub fn delete_card(&mut self, board_id: &str, column_id: &str, card_id: &str) -> KaizenResult<Card> {
        self.mutate(|boards| {
            let board = find_board_mut(boards, board_id)?;
            let column = find_column_mut(board, column_id)?;
            let card = take_card(column, card_id)?;
            debug!(board_id, column_id, card_id, "Deleted card");
            Ok(card)
        })
    }

    /// Move a card between two columns of the same board.
    ///
    /// The card is appended at the end of the destination column.
    pub fn move_card(
        &mut self,
        board_id: &str,
        card_id: &str,
        source_column_id: &str,
        dest_column_id: &str,
    ) -> KaizenResult<()> {
        self.mutate(|boards| {
            let board = find_board_mut(boards, board_id)?;
            if board.column(dest_column_id).is_none() {
                return Err(KaizenError::ColumnNotFound(dest_column_id.to_string()));
            }
            let source = find_column_mut(board, source_column_id)?;
            let card = take_card(source, card_id)?;
            find_column_mut(board, dest_column_id)?.cards.push(card);
            debug!(board_id, card_id, from = source_column_id, to = dest_column_id, "Moved card");
            Ok(())
        })
    }

    /// Move a card to another department's board, rewriting its department.
    ///
    /// Both ends are validated before anything changes; missing target boards
    /// or columns are reported, never created.
    pub fn transfer_card_to_department(
        &mut self,
        src_board_id: &str,
        src_column_id: &str,
        card_id: &str,
        target_dept_id: &str,
        target_board_id: &str,
        target_column_id: &str,
    ) -> KaizenResult<Card> {
        self.mutate(|boards| {
            let target = find_board_mut(boards, target_board_id)?;
            if target.column(target_column_id).is_none() {
                return Err(KaizenError::ColumnNotFound(target_column_id.to_string()));
            }

            let source = find_board_mut(boards, src_board_id)?;
            let mut card = take_card(find_column_mut(source, src_column_id)?, card_id)?;
            card.department_id = Some(target_dept_id.to_string());

            let target = find_board_mut(boards, target_board_id)?;
            find_column_mut(target, target_column_id)?.cards.push(card.clone());
            debug!(
                card_id,
                from_board = src_board_id,
                to_board = target_board_id,
                to_column = target_column_id,
                department = target_dept_id,
                "Transferred card"
            );
            Ok(card)
        })
    }

    /// Append a column to a board.
    pub fn add_column(&mut self, board_id: &str, column: Column) -> KaizenResult<()> {
        self.mutate(|boards| {
            let board = find_board_mut(boards, board_id)?;
            if board.column(&column.id).is_some() {
                return Err(KaizenError::validation(format!(
                    "Column '{}' already exists on board '{}'",
                    column.id, board_id
                )));
            }
            debug!(board_id, column_id = %column.id, "Added column");
            board.columns.push(column);
            Ok(())
        })
    }

    /// Delete a column together with its cards.
    pub fn delete_column(&mut self, board_id: &str, column_id: &str) -> KaizenResult<Column> {
        self.mutate(|boards| {
            let board = find_board_mut(boards, board_id)?;
            let index = board
                .columns
                .iter()
                .position(|c| c.id == column_id)
                .ok_or_else(|| KaizenError::ColumnNotFound(column_id.to_string()))?;
            let column = board.columns.remove(index);
            debug!(board_id, column_id, discarded = column.cards.len(), "Deleted column");
            Ok(column)
        })
    }

    /// Reorder a board's columns. `ordered_ids` must list every column once.
    pub fn update_column_order(&mut self, board_id: &str, ordered_ids: &[String]) -> KaizenResult<()> {
        self.mutate(|boards| {
            let board = find_board_mut(boards, board_id)?;

            let mut expected: Vec<&str> = board.columns.iter().map(|c| c.id.as_str()).collect();
            let mut given: Vec<&str> = ordered_ids.iter().map(String::as_str).collect();
            expected.sort_unstable();
            given.sort_unstable();
            if expected != given {
                return Err(KaizenError::validation(format!(
                    "Column order for board '{}' must list each existing column exactly once",
                    board_id
                )));
            }

            let mut remaining = std::mem::take(&mut board.columns);
            for id in ordered_ids {
                if let Some(pos) = remaining.iter().position(|c| &c.id == id) {
                    board.columns.push(remaining.remove(pos));
                }
            }
            debug!(board_id, "Reordered columns");
            Ok(())
        })
    }
}

fn find_board_mut<'a>(boards: &'a mut [Board], board_id: &str) -> KaizenResult<&'a mut Board> {
    boards
        .iter_mut()
        .find(|b| b.id == board_id)
        .ok_or_else(|| KaizenError::BoardNotFound(board_id.to_string()))
}

fn find_column_mut<'a>(board: &'a mut Board, column_id: &str) -> KaizenResult<&'a mut Column> {
    board
        .column_mut(column_id)
        .ok_or_else(|| KaizenError::ColumnNotFound(column_id.to_string()))
}

fn take_card(column: &mut Column, card_id: &str) -> KaizenResult<Card> {
    let index = column
        .cards
        .iter()
        .position(|c| c.id == card_id)
        .ok_or_else(|| KaizenError::CardNotFound(card_id.to_string()))?;
    Ok(column.cards.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    fn store_with_tasks_board() -> BoardStore {
        let mut store = BoardStore::new();
        store.initialize_board(
            "dept1-tasks",
            BoardCategory::Tasks,
            "dept1",
            vec![
                Column::untagged("dept1-tasks-todo", "To Do"),
                Column::untagged("dept1-tasks-inprogress", "In Progress"),
                Column::untagged("dept1-tasks-done", "Done"),
            ],
        );
        store
    }

    #[test]
    fn test_initialize_board_is_noop_when_present() {
        let mut store = store_with_tasks_board();
        store
            .add_card("dept1-tasks", "dept1-tasks-todo", NewCard::titled("Fix press"))
            .unwrap();

        let created = store.initialize_board("dept1-tasks", BoardCategory::Tasks, "dept1", vec![]);
        assert!(!created);
        assert_eq!(store.get_board("dept1-tasks").unwrap().columns.len(), 3);
        assert_eq!(store.get_board("dept1-tasks").unwrap().card_count(), 1);
    }

    #[test]
    fn test_add_card_inherits_board_department_and_category() {
        let mut store = store_with_tasks_board();
        let card = store
            .add_card("dept1-tasks", "dept1-tasks-todo", NewCard::titled("Label shelves"))
            .unwrap();
        assert_eq!(card.department_id.as_deref(), Some("dept1"));
        assert_eq!(card.category, Some(CardCategory::Task));
        assert!(!card.created_at.is_empty());

        let override_dept = NewCard {
            department_id: Some("dept9".into()),
            ..NewCard::titled("Borrowed")
        };
        let card = store.add_card("dept1-tasks", "dept1-tasks-todo", override_dept).unwrap();
        assert_eq!(card.department_id.as_deref(), Some("dept9"));
    }

    #[test]
    fn test_move_card_appends_to_destination() {
        let mut store = store_with_tasks_board();
        let a = store.add_card("dept1-tasks", "dept1-tasks-done", NewCard::titled("a")).unwrap();
        let b = store.add_card("dept1-tasks", "dept1-tasks-todo", NewCard::titled("b")).unwrap();

        store
            .move_card("dept1-tasks", &b.id, "dept1-tasks-todo", "dept1-tasks-done")
            .unwrap();

        let board = store.get_board("dept1-tasks").unwrap();
        let done: Vec<&str> = board.column("dept1-tasks-done").unwrap().cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(done, vec![a.id.as_str(), b.id.as_str()]);
        assert!(board.column("dept1-tasks-todo").unwrap().cards.is_empty());
    }

    #[test]
    fn test_move_card_with_missing_parts_changes_nothing() {
        let mut store = store_with_tasks_board();
        let card = store.add_card("dept1-tasks", "dept1-tasks-todo", NewCard::titled("x")).unwrap();
        let before = store.clone();

        assert!(store.move_card("nope", &card.id, "dept1-tasks-todo", "dept1-tasks-done").is_err());
        assert!(store.move_card("dept1-tasks", &card.id, "dept1-tasks-todo", "nope").is_err());
        assert!(store.move_card("dept1-tasks", &card.id, "dept1-tasks-done", "dept1-tasks-todo").is_err());
        assert!(store.move_card("dept1-tasks", "ghost", "dept1-tasks-todo", "dept1-tasks-done").is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_transfer_rewrites_department() {
        let mut store = store_with_tasks_board();
        store.ensure_department_boards("dept2", "en");
        let card = store.add_card("dept1-tasks", "dept1-tasks-todo", NewCard::titled("x")).unwrap();

        let target_column = column_id("dept2", BoardCategory::Tasks, ColumnType::ToDo);
        let moved = store
            .transfer_card_to_department("dept1-tasks", "dept1-tasks-todo", &card.id, "dept2", "dept2-tasks", &target_column)
            .unwrap();
        assert_eq!(moved.department_id.as_deref(), Some("dept2"));

        let location = store.find_card_by_id(&card.id).unwrap();
        assert_eq!(location.board_id, "dept2-tasks");
        assert_eq!(location.column_id, target_column);
        assert_eq!(store.get_board("dept1-tasks").unwrap().card_count(), 0);
    }

    #[test]
    fn test_transfer_to_missing_target_is_rejected() {
        let mut store = store_with_tasks_board();
        let card = store.add_card("dept1-tasks", "dept1-tasks-todo", NewCard::titled("x")).unwrap();
        let before = store.clone();

        let err = store
            .transfer_card_to_department("dept1-tasks", "dept1-tasks-todo", &card.id, "dept2", "dept2-tasks", "dept2-tasks-to-do")
            .unwrap_err();
        assert!(matches!(err, KaizenError::BoardNotFound(_)));
        assert_eq!(store, before);
    }

    #[test]
    fn test_delete_column_discards_cards() {
        let mut store = store_with_tasks_board();
        let card = store.add_card("dept1-tasks", "dept1-tasks-todo", NewCard::titled("x")).unwrap();
        let removed = store.delete_column("dept1-tasks", "dept1-tasks-todo").unwrap();
        assert_eq!(removed.cards.len(), 1);
        assert!(store.find_card_by_id(&card.id).is_none());
    }

    #[test]
    fn test_update_column_order_requires_permutation() {
        let mut store = store_with_tasks_board();
        let order = vec![
            "dept1-tasks-done".to_string(),
            "dept1-tasks-todo".to_string(),
            "dept1-tasks-inprogress".to_string(),
        ];
        store.update_column_order("dept1-tasks", &order).unwrap();
        let ids: Vec<String> = store.get_board("dept1-tasks").unwrap().columns.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, order);

        let partial = vec!["dept1-tasks-done".to_string()];
        assert!(store.update_column_order("dept1-tasks", &partial).is_err());
    }

    #[test]
    fn test_update_and_delete_card() {
        let mut store = store_with_tasks_board();
        let card = store.add_card("dept1-tasks", "dept1-tasks-todo", NewCard::titled("x")).unwrap();
        let updated = store
            .update_card(
                "dept1-tasks",
                "dept1-tasks-todo",
                &card.id,
                CardUpdate {
                    title: Some("y".into()),
                    priority: Some(Priority::High),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "y");
        assert_eq!(updated.priority, Some(Priority::High));
        assert_eq!(updated.id, card.id);

        store.delete_card("dept1-tasks", "dept1-tasks-todo", &card.id).unwrap();
        assert!(store.find_card_by_id(&card.id).is_none());
    }

    #[test]
    fn test_set_card_meeting() {
        let mut store = store_with_tasks_board();
        let card = store
            .add_card("dept1-tasks", "dept1-tasks-todo", NewCard::titled("Sweep aisle"))
            .unwrap();
        store.set_card_meeting(&card.id, "m1").unwrap();
        let found = store.find_card_by_id(&card.id).unwrap();
        assert_eq!(found.card.meeting_id.as_deref(), Some("m1"));

        let before = store.clone();
        assert!(store.set_card_meeting("ghost", "m1").is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_ensure_department_boards_is_idempotent() {
        let mut store = BoardStore::new();
        assert_eq!(store.ensure_department_boards("qa", "es").len(), 3);
        assert!(store.ensure_department_boards("qa", "es").is_empty());

        let problems = store.get_board("qa-problems").unwrap();
        assert_eq!(problems.columns[1].title, "Análisis");
        assert_eq!(problems.columns[1].column_type(), ColumnType::Analysis);
    }
}
