use std::collections::HashSet;

use grid_snake::game::{
    Difficulty, Direction, EndReason, GameConfig, GameEngine, GamePhase, Position,
};
use grid_snake::scoreboard::Scoreboard;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn segments(engine: &GameEngine) -> Vec<Position> {
    engine.snake().segments().copied().collect()
}

fn assert_board_invariants(engine: &GameEngine) {
    let body = segments(engine);
    assert!(!body.is_empty());

    let unique: HashSet<Position> = body.iter().copied().collect();
    assert_eq!(unique.len(), body.len(), "snake overlaps itself: {body:?}");

    for segment in &body {
        assert!(segment.is_within(engine.board_size()));
    }

    if let Some(food) = engine.food() {
        assert!(food.is_within(engine.board_size()));
        assert!(!body.contains(&food), "food {food:?} inside snake");
    }
}

/// Play many games with random steering and check the invariants each tick
#[test]
fn random_play_keeps_invariants() {
    let mut steering = StdRng::seed_from_u64(2024);

    for seed in 0..20 {
        let config = GameConfig::small().with_difficulty(Difficulty::Easy);
        let mut engine = GameEngine::with_seed(config, seed).unwrap();
        assert_board_invariants(&engine);
        engine.start().unwrap();

        for _ in 0..500 {
            if steering.gen_bool(0.3) {
                let direction = DIRECTIONS[steering.gen_range(0..DIRECTIONS.len())];
                let _ = engine.request_direction(direction);
            }

            let before_len = engine.snake().len();
            let before_score = engine.score();
            let events = engine.tick();

            assert!(engine.score() >= before_score);
            if events.food_eaten {
                assert_eq!(engine.snake().len(), before_len + 1);
                assert_eq!(engine.score(), before_score + 5);
            } else {
                assert_eq!(engine.snake().len(), before_len);
                assert_eq!(engine.score(), before_score);
            }
            assert_board_invariants(&engine);

            if let Some(game_over) = events.game_over {
                assert_eq!(engine.phase(), GamePhase::Over);
                assert_eq!(game_over.final_score, engine.score());
                break;
            }
        }
    }
}

#[test]
fn reversal_never_applies() {
    let mut engine = GameEngine::with_seed(GameConfig::default(), 9).unwrap();
    engine.start().unwrap();
    engine.request_direction(Direction::Right).unwrap();
    engine.tick();

    assert!(engine.request_direction(Direction::Left).is_err());
    engine.tick();
    assert_eq!(engine.current_direction(), Direction::Right);
}

#[test]
fn first_move_from_reset() {
    let mut engine = GameEngine::with_seed(GameConfig::default(), 4).unwrap();
    assert_eq!(segments(&engine), vec![Position::new(10, 10)]);
    assert_eq!(engine.current_direction(), Direction::None);
    assert_eq!(engine.score(), 0);

    engine.start().unwrap();
    engine.request_direction(Direction::Right).unwrap();
    let ate = engine.food() == Some(Position::new(11, 10));
    engine.tick();

    if ate {
        assert_eq!(
            segments(&engine),
            vec![Position::new(11, 10), Position::new(10, 10)]
        );
    } else {
        assert_eq!(segments(&engine), vec![Position::new(11, 10)]);
    }
}

#[test]
fn running_off_the_board_freezes_the_game() {
    let mut engine = GameEngine::with_seed(GameConfig::default(), 12).unwrap();
    engine.start().unwrap();
    engine.request_direction(Direction::Right).unwrap();

    let mut ended = None;
    for _ in 0..20 {
        if let Some(game_over) = engine.tick().game_over {
            ended = Some(game_over);
            break;
        }
    }

    let game_over = ended.expect("snake should reach the right wall");
    assert_eq!(game_over.reason, EndReason::Wall);
    assert_eq!(engine.snake().head().x, 19);

    let score = engine.score();
    let body = segments(&engine);
    for _ in 0..5 {
        assert!(!engine.tick().moved);
    }
    assert_eq!(engine.score(), score);
    assert_eq!(segments(&engine), body);
}

#[test]
fn seeded_games_replay_identically() {
    let play = |seed: u64| {
        let mut engine = GameEngine::with_seed(GameConfig::small(), seed).unwrap();
        engine.start().unwrap();
        let mut trace = Vec::new();
        for (i, direction) in DIRECTIONS.iter().cycle().take(40).enumerate() {
            if i % 3 == 0 {
                let _ = engine.request_direction(*direction);
            }
            engine.tick();
            trace.push((engine.snapshot().snake, engine.food(), engine.phase()));
        }
        trace
    };

    assert_eq!(play(77), play(77));
}

#[test]
fn scoreboard_follows_tick_events() {
    let mut engine = GameEngine::with_seed(GameConfig::small(), 31).unwrap();
    let mut scoreboard = Scoreboard::in_memory();

    for _ in 0..3 {
        engine.start().unwrap();
        engine.request_direction(Direction::Down).unwrap();
        while engine.phase() == GamePhase::Running {
            let events = engine.tick();
            scoreboard.dispatch(&events).unwrap();
        }
    }

    assert_eq!(scoreboard.leaderboard().len(), 3);
    assert_eq!(scoreboard.best(), scoreboard.leaderboard()[0]);
}
