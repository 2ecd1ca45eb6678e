//! Table-size coverage: every supported player/team split deals, rotates
//! and plays out without hidden two-player assumptions.

use fiva_engine::ai::{AiConfig, AutoPlay, Difficulty, StopReason};
use fiva_engine::board::BoardLayout;
use fiva_engine::core::{hand_size_for, GameConfig, PlayerId, TeamId};
use fiva_engine::rules::Game;

/// Test that hand sizes follow the player-count table.
#[test]
fn test_hand_sizes_by_player_count() {
    let expected = [(2, 7), (3, 6), (4, 6), (5, 5), (6, 5), (7, 4), (8, 4), (9, 4), (10, 3), (11, 3), (12, 3)];
    for (players, size) in expected {
        assert_eq!(hand_size_for(players), size, "{players} players");
    }
}

/// Test that every valid table deals the right number of cards.
#[test]
fn test_deal_for_every_table() {
    for teams in [2usize, 3] {
        for players in (2..=12).filter(|p| p % teams == 0 && *p >= teams) {
            let game = Game::new_game(players, teams, BoardLayout::sequential(), 42).unwrap();
            let hand_size = hand_size_for(players);

            for player in PlayerId::all(players) {
                assert_eq!(game.hand(player).len(), hand_size);
            }
            assert_eq!(game.deck().deck_count(), 104 - players * hand_size);
            assert!(game.check_conservation());
        }
    }
}

/// Test that turn order interleaves teams.
#[test]
fn test_seats_interleave_teams() {
    let config = GameConfig::new(6, 3).unwrap();
    assert_eq!(config.team_size(), 2);

    let game = Game::new(config, BoardLayout::sequential()).unwrap();
    let teams: Vec<TeamId> = PlayerId::all(6).map(|p| game.team_of(p)).collect();
    assert_eq!(
        teams,
        vec![TeamId(0), TeamId(1), TeamId(2), TeamId(0), TeamId(1), TeamId(2)]
    );
}

/// Test that the turn passes around a large table in seat order.
#[test]
fn test_rotation_on_twelve_seats() {
    let mut game = Game::new_game(12, 3, BoardLayout::sequential(), 8).unwrap();
    for expected in (0..12).chain(0..3) {
        assert_eq!(game.active_player(), PlayerId(expected));
        let choice = game.ai_choose_action(game.active_player(), Difficulty::Easy).unwrap();
        game.apply_action(game.active_player(), choice.action).unwrap();
    }
}

/// Test that big tables play to the end.
#[test]
fn test_large_tables_finish() {
    for (players, teams, seed) in [(12usize, 2usize, 1u64), (9, 3, 2), (12, 3, 3)] {
        let mut game = Game::new_game(players, teams, BoardLayout::sequential(), seed).unwrap();
        let report = AutoPlay::all_ai(players, AiConfig::new(Difficulty::Medium))
            .with_max_turns(5_000)
            .run(&mut game);

        assert_eq!(report.reason, StopReason::GameOver, "{players}p/{teams}t");
        assert!(game.check_conservation());
    }
}

/// Test that a threshold override is honoured for larger team counts.
#[test]
fn test_threshold_override() {
    let config = GameConfig::new(4, 2).unwrap().with_win_threshold(2);
    let game = Game::new(config, BoardLayout::sequential()).unwrap();
    assert_eq!(game.state().win_threshold, 2);
}
