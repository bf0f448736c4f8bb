//! Integration tests: full pointer gestures through `SpreadCanvas` against a
//! `SpreadLayout` store.

use pretty_assertions::assert_eq;
use spread_core::{CanvasConfig, GridPoint, Position, PositionId, PositionStore, SpreadLayout};
use spread_editor::{CanvasEvent, CanvasMode, CanvasState, InputEvent, SpreadCanvas};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn row_of_three() -> SpreadLayout {
    let positions = [(0, 0), (300, 0), (600, 0)]
        .into_iter()
        .enumerate()
        .map(|(i, (x, y))| Position::new(PositionId::fresh(), format!("Card {}", i + 1), x, y))
        .collect();
    SpreadLayout::from_positions(positions, CanvasConfig::default())
}

fn origins(store: &SpreadLayout) -> Vec<GridPoint> {
    store.positions().iter().map(Position::origin).collect()
}

#[test]
fn marquee_then_group_drag_moves_both_by_one_step() {
    init_logging();
    let mut store = row_of_three();
    let mut canvas = SpreadCanvas::new(CanvasConfig::default(), CanvasMode::Editable);

    // Rubber-band from below-left of card 1 to above-right of card 2.
    canvas.handle(&mut store, &InputEvent::pointer_down(250.0, 200.0));
    canvas.handle(&mut store, &InputEvent::pointer_move(500.0, 150.0));
    let events = canvas.handle(&mut store, &InputEvent::pointer_up(700.0, 100.0));
    assert_eq!(events, vec![CanvasEvent::SelectionChanged { selected: vec![1, 2] }]);

    // Drag card 1 by one grid step on each axis.
    canvas.handle(&mut store, &InputEvent::pointer_down(310.0, 10.0));
    canvas.handle(&mut store, &InputEvent::pointer_move(325.0, 25.0));
    assert!(matches!(canvas.state(), CanvasState::Dragging { index: 1, .. }));
    assert!(canvas.guides(&store).is_empty());

    // Mid-drag: the sibling is drawn moved, but the store is untouched.
    let frame = canvas.frame(&store);
    let sibling = frame.sprites.iter().find(|s| s.index == 2).unwrap();
    assert_eq!((sibling.x, sibling.y), (615, 15));
    assert_eq!(origins(&store)[2], GridPoint::new(600, 0));

    let events = canvas.handle(&mut store, &InputEvent::pointer_up(325.0, 25.0));
    assert_eq!(
        events,
        vec![CanvasEvent::Committed {
            index: 1,
            x: 315,
            y: 15,
            siblings: vec![2],
        }]
    );

    let config = CanvasConfig::default();
    let after = origins(&store);
    assert_eq!(after, vec![GridPoint::new(0, 0), GridPoint::new(315, 15), GridPoint::new(615, 15)]);
    for p in &after {
        assert!(config.on_grid(p.x, p.y));
        assert!(config.in_bounds(p.x, p.y));
    }
    assert!(canvas.guides(&store).is_empty());
    // The selection survives the drag.
    assert_eq!(canvas.selection().selected(), &[1, 2]);
}

#[test]
fn drag_past_the_edge_clamps_to_bounds() {
    init_logging();
    let mut store = SpreadLayout::from_positions(
        vec![Position::new(PositionId::fresh(), "Edge", 1395, 1335)],
        CanvasConfig::default(),
    );
    let mut canvas = SpreadCanvas::new(CanvasConfig::default(), CanvasMode::Editable);

    canvas.pointer_down(&mut store, 1400.0, 1340.0);
    canvas.pointer_move(1500.0, 1440.0);
    let events = canvas.pointer_up(&mut store, 1500.0, 1440.0);
    assert_eq!(
        events,
        vec![CanvasEvent::Committed {
            index: 0,
            x: 1410,
            y: 1350,
            siblings: vec![],
        }]
    );
}

#[test]
fn far_off_canvas_drag_saturates_instead_of_overflowing() {
    init_logging();
    let mut store = row_of_three();
    let mut canvas = SpreadCanvas::new(CanvasConfig::default(), CanvasMode::Editable);

    canvas.pointer_down(&mut store, 10.0, 10.0);
    canvas.pointer_move(1e12, 1e12);
    let events = canvas.pointer_up(&mut store, 1e12, 1e12);
    assert_eq!(
        events,
        vec![CanvasEvent::Committed {
            index: 0,
            x: 1410,
            y: 1350,
            siblings: vec![],
        }]
    );

    canvas.pointer_down(&mut store, 610.0, 10.0);
    canvas.pointer_move(-1e12, -1e12);
    canvas.pointer_up(&mut store, -1e12, -1e12);
    assert_eq!(
        origins(&store),
        vec![GridPoint::new(1410, 1350), GridPoint::new(300, 0), GridPoint::new(0, 0)]
    );
}

#[test]
fn tiny_background_travel_clears_instead_of_selecting() {
    init_logging();
    let mut store = row_of_three();
    let mut canvas = SpreadCanvas::new(CanvasConfig::default(), CanvasMode::Editable);

    canvas.pointer_down(&mut store, 250.0, 200.0);
    canvas.pointer_move(700.0, 100.0);
    canvas.pointer_up(&mut store, 700.0, 100.0);
    assert_eq!(canvas.selection().selected(), &[1, 2]);

    canvas.pointer_down(&mut store, 1000.0, 1000.0);
    canvas.pointer_move(1004.0, 1003.0);
    assert!(canvas.frame(&store).marquee.is_none());
    let events = canvas.pointer_up(&mut store, 1004.0, 1003.0);
    assert_eq!(events, vec![CanvasEvent::SelectionChanged { selected: vec![] }]);
}

#[test]
fn clicking_a_group_member_collapses_to_single_selection() {
    init_logging();
    let mut store = row_of_three();
    let mut canvas = SpreadCanvas::new(CanvasConfig::default(), CanvasMode::Editable);

    canvas.pointer_down(&mut store, 250.0, 200.0);
    canvas.pointer_up(&mut store, 700.0, 100.0);

    canvas.pointer_down(&mut store, 610.0, 10.0);
    let events = canvas.pointer_up(&mut store, 611.0, 12.0);
    assert_eq!(
        events,
        vec![
            CanvasEvent::SelectionChanged { selected: vec![] },
            CanvasEvent::ActiveChanged { active: Some(2) },
        ]
    );
    assert!(!store.is_dirty());
}

#[test]
fn panning_blocks_marquee_and_shifts_hit_testing() {
    init_logging();
    let mut store = row_of_three();
    let mut canvas = SpreadCanvas::new(CanvasConfig::default(), CanvasMode::Editable);
    canvas.mount(0.0, 0.0);
    canvas.handle(&mut store, &InputEvent::Resize { width: 800, height: 600 });

    canvas.handle(&mut store, &InputEvent::key_down(" "));
    canvas.handle(&mut store, &InputEvent::pointer_down(500.0, 300.0));
    canvas.handle(&mut store, &InputEvent::pointer_move(200.0, 300.0));
    canvas.handle(&mut store, &InputEvent::pointer_up(200.0, 300.0));
    assert!(canvas.selection().selected().is_empty());
    assert_eq!(canvas.frame(&store).scroll_x, 300.0);

    // Blur releases the held key; the next press is an ordinary one.
    canvas.handle(&mut store, &InputEvent::Blur);
    // Client (10, 10) is canvas (310, 10): the second card.
    canvas.handle(&mut store, &InputEvent::pointer_down(10.0, 10.0));
    let events = canvas.handle(&mut store, &InputEvent::pointer_up(10.0, 10.0));
    assert_eq!(events, vec![CanvasEvent::ActiveChanged { active: Some(1) }]);
}

#[test]
fn double_click_place_round_trip() {
    init_logging();
    let mut store = row_of_three();
    let mut canvas = SpreadCanvas::new(CanvasConfig::default(), CanvasMode::Editable);

    let events = canvas.handle(&mut store, &InputEvent::DoubleClick { x: 700.0, y: 420.0 });
    let [CanvasEvent::PlaceRequested { x, y }] = events.as_slice() else {
        panic!("expected a place request, got {events:?}");
    };
    let index = store.add_at(*x, *y);
    assert_eq!(index, 3);
    assert_eq!(store.positions()[3].origin(), GridPoint::new(660, 345));
}

#[test]
fn reorder_keeps_selection_on_the_same_cards() {
    init_logging();
    let mut store = row_of_three();
    let mut canvas = SpreadCanvas::new(CanvasConfig::default(), CanvasMode::Editable);
    canvas.pointer_down(&mut store, 250.0, 200.0);
    canvas.pointer_up(&mut store, 700.0, 100.0);
    let ids: Vec<PositionId> = canvas
        .selection()
        .selected()
        .iter()
        .map(|&i| store.positions()[i].id)
        .collect();

    assert!(store.move_entry(2, 0));
    canvas.on_entry_moved(2, 0);

    let after: Vec<PositionId> = canvas
        .selection()
        .selected()
        .iter()
        .map(|&i| store.positions()[i].id)
        .collect();
    let mut expected = ids;
    expected.sort_by_key(|id| store.index_of(*id));
    assert_eq!(after, expected);
}
