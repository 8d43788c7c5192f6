//! Grid world construction and transition tests

use gridworld::{
    Error, GridWorld,
    app::{ExperimentConfig, GridConfig, TerminalConfig},
    grid::{CellKind, TerminalKind},
    types::{Action, Cell},
};

mod common;

#[test]
fn test_classic_layout() {
    let world = GridWorld::classic();
    assert_eq!((world.rows(), world.cols()), (3, 4));
    assert_eq!(world.start(), Cell::new(2, 0));
    assert_eq!(world.len(), 12);

    assert!(!world.is_valid(Cell::new(1, 1)));
    assert!(!world.is_valid(Cell::new(3, 0)));
    assert!(!world.is_valid(Cell::new(0, 4)));
    assert!(world.is_valid(Cell::new(0, 3)));

    assert_eq!(world.reward_of(Cell::new(0, 3)), 1.0);
    assert_eq!(world.reward_of(Cell::new(1, 3)), -1.0);
    assert_eq!(world.reward_of(Cell::new(2, 2)), 0.0);
    assert_eq!(world.terminal_kind(Cell::new(0, 3)), Some(TerminalKind::Goal));
    assert_eq!(world.terminal_kind(Cell::new(1, 3)), Some(TerminalKind::Trap));
    assert_eq!(world.kind_of(Cell::new(1, 1)), CellKind::Obstacle);
    assert_eq!(world.kind_of(Cell::new(2, 0)), CellKind::Open);
}

#[test]
fn test_bumps_leave_agent_in_place() {
    let world = GridWorld::classic();
    // Edges
    assert_eq!(world.attempt_move(Cell::new(0, 0), Action::Up), Cell::new(0, 0));
    assert_eq!(world.attempt_move(Cell::new(0, 0), Action::Left), Cell::new(0, 0));
    assert_eq!(world.attempt_move(Cell::new(2, 3), Action::Down), Cell::new(2, 3));
    assert_eq!(world.attempt_move(Cell::new(2, 3), Action::Right), Cell::new(2, 3));
    // Obstacle at (1,1)
    assert_eq!(world.attempt_move(Cell::new(0, 1), Action::Down), Cell::new(0, 1));
    assert_eq!(world.attempt_move(Cell::new(1, 0), Action::Right), Cell::new(1, 0));
    assert_eq!(world.attempt_move(Cell::new(2, 1), Action::Up), Cell::new(2, 1));
    assert_eq!(world.attempt_move(Cell::new(1, 2), Action::Left), Cell::new(1, 2));
    // Ordinary moves
    assert_eq!(world.attempt_move(Cell::new(2, 0), Action::Up), Cell::new(1, 0));
    assert_eq!(world.attempt_move(Cell::new(0, 2), Action::Right), Cell::new(0, 3));
    assert_eq!(world.attempt_move(Cell::new(2, 3), Action::Up), Cell::new(1, 3));
}

#[test]
fn test_moves_never_teleport() {
    let world = GridWorld::classic();
    for cell in world.cells().filter(|&c| world.is_valid(c)) {
        for action in Action::ALL {
            let next = world.attempt_move(cell, action);
            assert!(world.is_valid(next), "{cell} {action} -> {next}");
            let distance = cell.row.abs_diff(next.row) + cell.col.abs_diff(next.col);
            assert!(distance <= 1, "{cell} {action} -> {next}");
        }
    }
}

#[test]
fn test_builder_rejects_bad_layouts() {
    let base = || {
        GridWorld::builder()
            .dimensions(2, 2)
            .goal(Cell::new(0, 1), 1.0)
            .start(Cell::new(1, 0))
    };
    assert!(base().build().is_ok());

    assert!(matches!(
        GridWorld::builder().dimensions(0, 4).build(),
        Err(Error::InvalidDimensions { rows: 0, cols: 4 })
    ));
    assert!(matches!(
        base().start(Cell::new(2, 0)).build(),
        Err(Error::StartOutOfBounds { .. })
    ));
    assert!(matches!(
        base().obstacle(Cell::new(1, 0)).build(),
        Err(Error::StartIsObstacle { .. })
    ));
    assert!(matches!(
        base().start(Cell::new(0, 1)).build(),
        Err(Error::StartIsTerminal { .. })
    ));
    assert!(matches!(
        base().obstacle(Cell::new(5, 5)).build(),
        Err(Error::ObstacleOutOfBounds { .. })
    ));
    assert!(matches!(
        base().trap(Cell::new(0, 2), -1.0).build(),
        Err(Error::TerminalOutOfBounds { .. })
    ));
    assert!(matches!(
        base().obstacle(Cell::new(0, 1)).build(),
        Err(Error::TerminalIsObstacle { .. })
    ));
    assert!(matches!(
        base().trap(Cell::new(0, 1), -1.0).build(),
        Err(Error::DuplicateTerminal { .. })
    ));
    assert!(matches!(
        base().trap(Cell::new(0, 0), f64::NAN).build(),
        Err(Error::InvalidReward { .. })
    ));
}

#[test]
fn test_world_without_terminals_is_allowed() {
    let world = GridWorld::builder().dimensions(2, 2).build().unwrap();
    assert_eq!(world.terminals().count(), 0);
    assert_eq!(world.start(), Cell::new(0, 0));
}

#[test]
fn test_zero_reward_terminal_counts_as_trap() {
    let world = GridWorld::builder()
        .dimensions(1, 2)
        .terminal(Cell::new(0, 1), 0.0)
        .build()
        .unwrap();
    assert_eq!(world.terminal_kind(Cell::new(0, 1)), Some(TerminalKind::Trap));
}

#[test]
fn test_config_errors_surface_from_validate() {
    let mut grid = GridConfig::default();
    grid.terminals.push(TerminalConfig {
        cell: Cell::new(2, 0),
        reward: 5.0,
    });
    let config = ExperimentConfig::default().with_grid(grid);
    let err = config.validate().unwrap_err();
    assert!(matches!(err, Error::StartIsTerminal { .. }));
    assert_eq!(err.to_string(), "start cell (2,0) is a terminal cell");
}

#[test]
fn test_grid_config_round_trips_through_json() {
    let config = common::enclosed_config(5, 10);
    let json = serde_json::to_string(&config).unwrap();
    let parsed: ExperimentConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
    assert_eq!(parsed.grid.build().unwrap(), common::enclosed_world());
}
