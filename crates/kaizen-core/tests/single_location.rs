use proptest::prelude::*;

use kaizen_core::board::{BoardCategory, BoardStore, NewCard};

const DEPARTMENTS: [&str; 2] = ["north", "south"];

#[derive(Debug, Clone)]
enum Op {
    /// Move card `card` to column index `column` on its current board.
    Move { card: usize, column: usize },
    /// Transfer card `card` to department `dept`, column index `column`.
    Transfer { card: usize, dept: usize, column: usize },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..6, 0usize..4).prop_map(|(card, column)| Op::Move { card, column }),
        (0usize..6, 0usize..2, 0usize..4)
            .prop_map(|(card, dept, column)| Op::Transfer { card, dept, column }),
    ]
}

fn occurrences(store: &BoardStore, card_id: &str) -> usize {
    store
        .boards()
        .iter()
        .flat_map(|b| &b.columns)
        .flat_map(|c| &c.cards)
        .filter(|c| c.id == card_id)
        .count()
}

fn seeded_store() -> (BoardStore, Vec<String>) {
    let mut store = BoardStore::new();
    for dept in DEPARTMENTS {
        store.ensure_department_boards(dept, "en");
    }
    let first_column = store.get_board("north-tasks").unwrap().columns[0].id.clone();
    let ids = (0..6)
        .map(|i| {
            store
                .add_card("north-tasks", &first_column, NewCard::titled(format!("card {i}")))
                .unwrap()
                .id
        })
        .collect();
    (store, ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_card_lives_in_exactly_one_column(ops in prop::collection::vec(arb_op(), 0..40)) {
        let (mut store, ids) = seeded_store();

        for op in ops {
            match op {
                Op::Move { card, column } => {
                    let location = store.find_card_by_id(&ids[card]).unwrap();
                    let board = store.get_board(&location.board_id).unwrap();
                    let dest = board.columns[column % board.columns.len()].id.clone();
                    let _ = store.move_card(&location.board_id, &ids[card], &location.column_id, &dest);
                }
                Op::Transfer { card, dept, column } => {
                    let location = store.find_card_by_id(&ids[card]).unwrap();
                    let target_board = format!("{}-{}", DEPARTMENTS[dept], BoardCategory::Tasks);
                    let board = store.get_board(&target_board).unwrap();
                    let dest = board.columns[column % board.columns.len()].id.clone();
                    let _ = store.transfer_card_to_department(
                        &location.board_id,
                        &location.column_id,
                        &ids[card],
                        DEPARTMENTS[dept],
                        &target_board,
                        &dest,
                    );
                }
            }

            for id in &ids {
                prop_assert_eq!(occurrences(&store, id), 1);
            }
        }
    }

    #[test]
    fn moves_to_missing_columns_change_nothing(card in 0usize..6) {
        let (mut store, ids) = seeded_store();
        let before = store.clone();
        let location = store.find_card_by_id(&ids[card]).unwrap();
        prop_assert!(store.move_card(&location.board_id, &ids[card], &location.column_id, "missing").is_err());
        prop_assert_eq!(store, before);
    }
}
