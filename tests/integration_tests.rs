//! Integration tests for the session: commands, gravity, scoring and lifecycle

use blockfall::core::{Board, GameConfig, GameState, PieceSource, Phase, Randomizer, SimpleRng};
use blockfall::types::{GameAction, PieceKind, BOARD_WIDTH, SPAWN_X, SPAWN_Y};

/// First seed at or after `start` whose opening piece is `kind`
fn seed_for_first_piece(kind: PieceKind, board: &Board, start: u32) -> GameState {
    (start..start + 10_000)
        .map(|seed| GameState::with_board(GameConfig::with_seed(seed), board.clone()))
        .find(|state| state.active().map(|p| p.kind) == Some(kind))
        .expect("some seed opens with the requested kind")
}

#[test]
fn test_game_lifecycle() {
    let state = GameState::new(GameConfig::with_seed(12345));

    let active = state.active().unwrap();
    assert_eq!((active.x, active.y, active.rotation), (SPAWN_X, SPAWN_Y, 0));
    assert_eq!(state.phase(), Phase::Falling);
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.fall_interval_ms(), 500);
}

#[test]
fn test_hard_drop_on_empty_board() {
    let mut state = GameState::new(GameConfig::with_seed(7));
    let kind = state.active().unwrap().kind;
    let next = state.next_piece();

    assert_eq!(state.hard_drop(), Some(20));
    assert_eq!(state.score(), 40);
    assert_eq!(state.board().filled_count(), 4);
    assert_eq!(state.pieces_locked(), 1);

    // Bottom row holds the piece's lower minos.
    let bottom_row: Vec<_> = (0..BOARD_WIDTH as i8)
        .filter_map(|x| state.board().get(x, 19).flatten())
        .collect();
    assert!(!bottom_row.is_empty());
    assert!(bottom_row.iter().all(|&k| k == kind));

    let active = state.active().unwrap();
    assert_eq!(active.kind, next);
    assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
}

#[test]
fn test_single_line_clear_scores() {
    let board = Board::from_rows(&["JJJ....LLL"]);
    let mut state = seed_for_first_piece(PieceKind::I, &board, 1);

    // Horizontal I at x = 3 fills columns 3..6 of row 19.
    assert_eq!(state.hard_drop(), Some(20));
    let event = state.take_last_event().unwrap();

    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.line_clear_score, 100);
    assert_eq!(state.score(), 40 + 100);
    assert_eq!(state.lines(), 1);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_tetris_with_vertical_i() {
    let board = Board::from_rows(&["SSSSSSSSS."; 4]);
    let mut state = seed_for_first_piece(PieceKind::I, &board, 100);

    assert!(state.apply_action(GameAction::Rotate));
    for _ in 0..4 {
        assert!(state.apply_action(GameAction::MoveRight));
    }
    // Vertical I occupies column x + 2, the well.
    assert!(!state.apply_action(GameAction::MoveRight));
    assert_eq!(state.active().unwrap().x, 7);

    assert_eq!(state.hard_drop(), Some(18));
    let event = state.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 4);
    assert_eq!(event.line_clear_score, 800);
    assert!(!event.level_up);

    assert_eq!(state.score(), 36 + 800);
    assert_eq!(state.lines(), 4);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_level_tracks_lines_during_play() {
    let mut state = GameState::new(GameConfig::with_seed(2024));
    let mut policy = SimpleRng::new(99);
    let actions = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];

    let mut last_score = 0;
    for frame in 0..20_000 {
        if state.game_over() {
            break;
        }
        if frame % 4 == 0 {
            let action = actions[policy.next_range(actions.len() as u32) as usize];
            state.apply_action(action);
        }
        state.update(16);

        assert!(state.score() >= last_score, "score never decreases");
        last_score = state.score();
        assert_eq!(state.level(), 1 + state.lines() / 10);
        assert_eq!(
            state.fall_interval_ms(),
            500u32.saturating_sub((state.level() - 1) * 40).max(80)
        );
        assert!(state.fall_timer_ms() < state.fall_interval_ms());
    }
}

#[test]
fn test_gravity_moves_one_row_per_interval() {
    let mut state = GameState::new(GameConfig::with_seed(3));
    let start_y = state.active().unwrap().y;

    assert!(!state.update(499));
    assert_eq!(state.active().unwrap().y, start_y);

    assert!(state.update(1));
    assert_eq!(state.active().unwrap().y, start_y + 1);
    assert_eq!(state.fall_timer_ms(), 0);

    // Three intervals plus change in one call.
    assert!(state.update(1_520));
    assert_eq!(state.active().unwrap().y, start_y + 4);
    assert_eq!(state.fall_timer_ms(), 20);
}

#[test]
fn test_gravity_eventually_locks() {
    let mut state = GameState::new(GameConfig::with_seed(3));

    // 20 steps bring a rotation-0 piece to rest at y = 18; the 21st locks it.
    for _ in 0..21 {
        state.update(500);
    }
    assert_eq!(state.pieces_locked(), 1);
    assert_eq!(state.board().filled_count(), 4);
    assert_eq!(state.active().unwrap().y, SPAWN_Y);
}

#[test]
fn test_pause_blocks_commands_and_gravity() {
    let mut state = GameState::new(GameConfig::with_seed(5));
    state.update(300);

    assert!(state.apply_action(GameAction::Pause));
    assert_eq!(state.phase(), Phase::Paused);
    assert_eq!(state.fall_timer_ms(), 0);

    let before = state.snapshot();
    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.apply_action(GameAction::Rotate));
    assert!(!state.apply_action(GameAction::HardDrop));
    assert!(!state.update(10_000));
    assert_eq!(state.snapshot(), before);

    assert!(state.apply_action(GameAction::Pause));
    assert_eq!(state.phase(), Phase::Falling);
    assert!(state.apply_action(GameAction::SoftDrop));
}

#[test]
fn test_game_over_and_restart() {
    let mut board = Board::new();
    for x in 3..7 {
        board.set(x, 0, Some(PieceKind::O));
    }
    let mut state = GameState::with_board(GameConfig::with_seed(42), board.clone());

    assert!(state.game_over());
    assert_eq!(state.phase(), Phase::GameOver);
    assert!(state.active().is_none());
    assert_eq!(state.board(), &board);

    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.apply_action(GameAction::Pause));
    assert!(!state.update(1_000));

    assert!(state.apply_action(GameAction::Restart));
    assert!(!state.game_over());
    assert_eq!(state.episode(), 1);
    assert_eq!(state.board().filled_count(), 0);
    assert_eq!(state.score(), 0);
    assert!(state.active().is_some());

    // A live session ignores restart.
    assert!(!state.apply_action(GameAction::Restart));
}

#[test]
fn test_stacking_without_clears_ends_game() {
    let mut state = GameState::new(GameConfig::with_seed(8));

    let mut drops = 0;
    while !state.game_over() {
        assert!(state.hard_drop().is_some());
        drops += 1;
        assert!(drops < 200, "stacking in the middle must top out");
    }

    assert!(state.active().is_none());
    assert!(state.hard_drop().is_none());
    assert!(state.snapshot().game_over);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];

    let play = |randomizer: Randomizer| {
        let config = GameConfig {
            randomizer,
            ..GameConfig::with_seed(31337)
        };
        let mut state = GameState::new(config);
        for (i, action) in script.iter().cycle().take(400).enumerate() {
            state.apply_action(*action);
            state.update(16 * (i as u32 % 5));
        }
        state.snapshot()
    };

    assert_eq!(play(Randomizer::Uniform), play(Randomizer::Uniform));
    assert_eq!(play(Randomizer::Bag), play(Randomizer::Bag));
}

#[test]
fn test_bag_randomizer_deals_each_kind_once_per_seven() {
    let mut source = PieceSource::new(Randomizer::Bag, 77);

    for _ in 0..5 {
        let mut bag: Vec<_> = (0..7).map(|_| source.draw()).collect();
        bag.sort_by_key(|k| k.code());
        assert_eq!(bag, PieceKind::ALL.to_vec());
    }
}

#[test]
fn test_session_opens_with_first_bag_draw() {
    let config = GameConfig {
        randomizer: Randomizer::Bag,
        ..GameConfig::with_seed(77)
    };
    let state = GameState::new(config);
    let mut source = PieceSource::new(Randomizer::Bag, 77);

    assert_eq!(state.active().unwrap().kind, source.draw());
    assert_eq!(state.next_piece(), source.draw());
}
