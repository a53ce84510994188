use deepmine_core::*;
use proptest::prelude::*;

/// Board shape plus a mine count that leaves at least one safe cell.
fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (1u8..=12, 1u8..=12).prop_flat_map(|(rows, cols)| {
        let cells = usize::from(rows) * usize::from(cols);
        (0..cells).prop_map(move |mines| {
            GameConfig::new(rows.into(), cols.into(), mines).expect("valid config")
        })
    })
}

/// Centers near the board plus the ends of the `i32` range.
fn center_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![
        4 => -20i32..40,
        1 => prop_oneof![
            Just(i32::MIN),
            Just(i32::MIN + 1),
            Just(i32::MAX - 1),
            Just(i32::MAX),
        ],
    ]
}

fn all_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
    (0..size.0).flat_map(move |row| (0..size.1).map(move |col| (row, col)))
}

fn first_safe_cell(board: &Board, layout: &MineLayout) -> Coord2 {
    all_coords(board.size())
        .find(|&pos| !layout.contains_mine(pos))
        .expect("configs always leave a safe cell")
}

proptest! {
    #[test]
    fn layout_has_exactly_the_requested_mines(config in config_strategy(), seed: u64) {
        let layout = generate(config, &mut SeededMineSource::new(seed));

        prop_assert_eq!(layout.mine_count(), config.mines());
        prop_assert_eq!(layout.mine_coords().count(), usize::from(config.mines()));
        prop_assert_eq!(layout.size(), config.size());
    }

    #[test]
    fn same_seed_same_mines(config in config_strategy(), seed: u64) {
        let first = Board::new(config, Some(seed));
        let second = Board::new(config, Some(seed));

        prop_assert_eq!(first, second);
    }

    #[test]
    fn adjacent_counts_match_layout(config in config_strategy(), seed: u64) {
        let layout = generate(config, &mut SeededMineSource::new(seed));

        for pos in all_coords(config.size()) {
            let (row, col) = (i32::from(pos.0), i32::from(pos.1));
            let expected = all_coords(config.size())
                .filter(|&other| other != pos)
                .filter(|&(r, c)| {
                    (i32::from(r) - row).abs() <= 1 && (i32::from(c) - col).abs() <= 1
                })
                .filter(|&other| layout.contains_mine(other))
                .count();
            let count = layout.adjacent_mine_count(pos);
            prop_assert!(count <= 8);
            prop_assert_eq!(usize::from(count), expected);
        }
    }

    #[test]
    fn cascade_leaves_no_hidden_cell_next_to_a_zero(config in config_strategy(), seed: u64) {
        let layout = generate(config, &mut SeededMineSource::new(seed));
        let mut board = Board::from_layout(layout.clone());
        let start = first_safe_cell(&board, &layout);

        let outcome = board.dig(start).unwrap();

        prop_assert!(outcome.survived());
        prop_assert_eq!(outcome.revealed, board.revealed_count());
        for pos in all_coords(config.size()) {
            if board.cell_at(pos) == EngineCell::Revealed(0) {
                for neighbor in layout.iter_neighbors(pos) {
                    prop_assert!(!board.cell_at(neighbor).is_unrevealed());
                }
            }
        }
    }

    #[test]
    fn won_exactly_when_all_safe_cells_revealed(config in config_strategy(), seed: u64) {
        let layout = generate(config, &mut SeededMineSource::new(seed));
        let mut board = Board::from_layout(layout.clone());

        for pos in all_coords(config.size()).filter(|&pos| !layout.contains_mine(pos)) {
            if board.cell_at(pos).is_unrevealed() {
                prop_assert_eq!(board.status(), GameStatus::InProgress);
                prop_assert!(board.revealed_count() < config.safe_cells());
                board.dig(pos).unwrap();
            }
        }

        prop_assert_eq!(board.revealed_count(), config.safe_cells());
        prop_assert_eq!(board.status(), GameStatus::Won);
    }

    #[test]
    fn neighborhood_has_fixed_length(
        row in center_strategy(),
        col in center_strategy(),
        radius in 0u8..6,
        seed: u64,
    ) {
        let board = Board::preset(Difficulty::Beginner, Some(seed));

        let hood = board.neighborhood((row, col), radius);

        let side = 2 * usize::from(radius) + 1;
        prop_assert_eq!(hood.len(), side * side);
        let (row, col, radius) = (i64::from(row), i64::from(col), i64::from(radius));
        let mut codes = hood.iter();
        for r in (row - radius)..=(row + radius) {
            for c in (col - radius)..=(col + radius) {
                let code = *codes.next().unwrap();
                let on_board = (0..8).contains(&r) && (0..8).contains(&c);
                prop_assert_eq!(code == CellView::OUT_OF_BOUNDS, !on_board);
            }
        }
    }

    #[test]
    fn double_flag_then_dig_matches_plain_dig(config in config_strategy(), seed: u64, pick: usize) {
        let mut plain = Board::new(config, Some(seed));
        let mut flagged = plain.clone();
        let cells: Vec<_> = all_coords(config.size()).collect();
        let target = cells[pick % cells.len()];

        flagged.toggle_flag(target).unwrap();
        flagged.toggle_flag(target).unwrap();
        prop_assert_eq!(flagged.cell_at(target), EngineCell::Hidden);

        prop_assert_eq!(flagged.dig(target), plain.dig(target));
        prop_assert_eq!(flagged, plain);
    }

    #[test]
    fn finished_games_reject_commands(config in config_strategy(), seed: u64, pick: usize) {
        let layout = generate(config, &mut SeededMineSource::new(seed));
        let mut board = Board::from_layout(layout.clone());
        let start = first_safe_cell(&board, &layout);
        board.dig(start).unwrap();
        if !board.is_finished() {
            // re-digging ends the game, whatever the layout
            board.dig(start).unwrap();
            prop_assert_eq!(board.status(), GameStatus::Lost);
        }

        let snapshot = board.clone();
        let cells: Vec<_> = all_coords(config.size()).collect();
        let target = cells[pick % cells.len()];

        prop_assert_eq!(board.dig(target), Err(GameError::GameAlreadyOver));
        prop_assert_eq!(board.toggle_flag(target), Err(GameError::GameAlreadyOver));
        prop_assert_eq!(board, snapshot);
    }
}

#[test]
fn bottom_row_of_mines_cascades_over_everything_else() {
    let mines: Vec<Coord2> = (0..5).map(|col| (4, col)).collect();
    let mut board = Board::from_layout(MineLayout::from_mine_coords((5, 5), &mines).unwrap());

    let outcome = board.dig((0, 0)).unwrap();

    assert!(outcome.survived());
    assert_eq!(outcome.revealed, 20);
    assert_eq!(outcome.status, GameStatus::Won);
}

#[test]
fn redig_is_always_fatal() {
    let layout = MineLayout::from_mine_coords((4, 4), &[(1, 1)]).unwrap();
    let mut board = Board::from_layout(layout);

    assert!(board.dig((0, 0)).unwrap().survived());
    let outcome = board.dig((0, 0)).unwrap();

    assert_eq!(outcome.survival, Survival::Died);
    assert_eq!(outcome.status, GameStatus::Lost);
}

#[test]
fn mine_free_board_is_won_by_first_dig() {
    let mut board = Board::with_dimensions(4, 4, 0, Some(3)).unwrap();

    assert_eq!(board.dig((0, 0)).unwrap().status, GameStatus::Won);
    assert_eq!(board.dig((0, 0)), Err(GameError::GameAlreadyOver));
}

#[test]
fn invalid_configs_never_produce_a_board() {
    for (rows, cols, mines) in [(2, 2, 4), (2, 2, 5), (0, 3, 0), (3, 0, 0), (300, 2, 1)] {
        assert!(matches!(
            Board::with_dimensions(rows, cols, mines, Some(1)),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(GameConfig::new(rows, cols, mines).is_err());
    }

    let full: Vec<Coord2> = all_coords((2, 2)).collect();
    assert!(matches!(
        MineLayout::from_mine_coords((2, 2), &full),
        Err(GameError::InvalidConfiguration(ConfigError::TooManyMines { .. }))
    ));
}
