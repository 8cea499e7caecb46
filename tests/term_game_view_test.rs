use block_blast::core::{GameConfig, GameSession, GameSnapshot, MemoryStore, ScriptedRng};
use block_blast::term::{AnchorY, BoardOverlay, FrameBuffer, GameView, Viewport};

fn snapshot() -> GameSnapshot {
    // Every slot holds the square.
    GameSession::with_parts(
        GameConfig::default(),
        ScriptedRng::new(vec![7]),
        MemoryStore::new(),
    )
    .unwrap()
    .snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn top_view() -> GameView {
    GameView::default().with_anchor_y(AnchorY::Top)
}

#[test]
fn term_view_renders_border_corners() {
    // 8 cells * 2 columns + border = 18 wide, 8 + 2 = 10 tall.
    let fb = top_view().render(&snapshot(), Viewport::new(18, 20));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(17, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 9).unwrap().ch, '└');
    assert_eq!(fb.get(17, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_filled_cell_as_two_chars_wide() {
    let mut snap = snapshot();
    snap.board[7][0] = 1;

    let fb = top_view().render(&snap, Viewport::new(18, 20));
    assert_eq!(fb.get(1, 8).unwrap().ch, '█');
    assert_eq!(fb.get(2, 8).unwrap().ch, '█');
    assert_eq!(fb.get(3, 8).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = snapshot();
    snap.score = 1234;
    snap.best = 5678;

    let text = screen_text(&top_view().render(&snap, Viewport::new(60, 20)));
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("BEST"));
    assert!(text.contains("5678"));
    assert!(text.contains("Next goal: 100pt"));
}

#[test]
fn term_view_marks_used_slots() {
    let mut snap = snapshot();
    snap.slots[1] = None;
    snap.selected = Some(2);

    let text = screen_text(&top_view().render(&snap, Viewport::new(60, 24)));
    assert!(text.contains("USED"));
    assert!(text.contains(">3"));
}

#[test]
fn term_view_colours_preview_by_validity() {
    let mut session = GameSession::with_parts(
        GameConfig::default(),
        ScriptedRng::new(vec![7]),
        MemoryStore::new(),
    )
    .unwrap();
    session.select_slot(0).unwrap();
    let snap = session.snapshot();
    let view = top_view();

    let ok = BoardOverlay {
        cursor: Some((0, 0)),
        preview: session.preview(0, 0, 0),
    };
    let fb = view.render_with_overlay(&snap, Some(&ok), Viewport::new(18, 20));
    let green = fb.get(1, 1).unwrap();
    assert_eq!(green.ch, '▒');

    let bad = BoardOverlay {
        cursor: Some((7, 7)),
        preview: session.preview(0, 7, 7),
    };
    let fb = view.render_with_overlay(&snap, Some(&bad), Viewport::new(18, 20));
    let red = fb.get(15, 8).unwrap();
    assert_eq!(red.ch, '▒');
    assert_ne!(green.style.fg, red.style.fg);
}

#[test]
fn term_view_shows_status_and_game_over() {
    let mut snap = snapshot();
    snap.status = "2 lines cleared!".to_string();
    let text = screen_text(&top_view().render(&snap, Viewport::new(40, 20)));
    assert!(text.contains("2 lines cleared!"));

    snap.game_over = true;
    let text = screen_text(&top_view().render(&snap, Viewport::new(40, 20)));
    assert!(text.contains("GAME OVER"));
}

#[test]
fn term_view_centers_content_on_tall_viewports() {
    let view = GameView::default();
    let content = view.content_height(8);
    let fb = view.render(&snapshot(), Viewport::new(18, content + 6));

    assert_eq!(fb.get(0, 3).unwrap().ch, '┌');
}
