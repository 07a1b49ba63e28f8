//! End-to-end: board mutations -> recorded render commands -> folded
//! model -> frame rendered through a TestBackend.

use std::sync::Arc;

use jobboard::surface::{fallback_line, FakeSurface};
use jobboard::tui::{render_frame, BoardModel, Viewport};
use jobboard::JobBoard;

fn folded_model(surface: &FakeSurface) -> BoardModel {
    let mut model = BoardModel::new();
    for command in surface.commands() {
        model.apply(command);
    }
    model
}

#[test]
fn frame_reflects_board_state_after_a_mixed_run() {
    let surface = FakeSurface::new();
    let board = JobBoard::new(Arc::new(surface.clone()));

    board.add_job("fetch", "Fetching sources");
    board.add_job("build", "Compiling workspace");
    board.add_job("docs", "Rendering documentation");
    board.add_job("publish", "Publishing artifacts");

    board.set_done("fetch").expect("done");
    board.set_active("build").expect("active");
    board.set_progress("build", 62).expect("progress");
    board.set_skipped("docs").expect("skip");
    board
        .set_failed_text("publish", "no credentials")
        .expect("failed");
    board.set_status_text("2 of 4 finished");

    let frame = render_frame(&folded_model(&surface), Viewport::default(), 70, 14);
    assert!(frame.contains("[    DONE] Fetching sources"));
    assert!(frame.contains("[  62%] Compiling workspace"));
    assert!(frame.contains("[    SKIP] Rendering documentation"));
    assert!(frame.contains("[    FAIL] Publishing artifacts : no credentials"));
    assert!(frame.contains("Progress: 25 %"));
    assert!(frame.contains("2 of 4 finished"));
}

#[test]
fn rows_render_in_insertion_order_top_to_bottom() {
    let surface = FakeSurface::new();
    let board = JobBoard::new(Arc::new(surface.clone()));
    for name in ["zeta", "alpha", "mid"] {
        board.add_job(name, format!("{name} job"));
    }
    // Touching an early row must not reorder it.
    board.set_active("zeta").expect("active");

    let frame = render_frame(&folded_model(&surface), Viewport::default(), 50, 12);
    let positions = ["zeta job", "alpha job", "mid job"]
        .map(|needle| frame.find(needle).expect("row present"));
    assert!(positions[0] < positions[1]);
    assert!(positions[1] < positions[2]);
}

#[test]
fn readding_a_name_rewrites_its_row_in_place() {
    let surface = FakeSurface::new();
    let board = JobBoard::new(Arc::new(surface.clone()));
    board.add_job("a", "original");
    board.add_job("b", "other");
    board.add_job("a", "rewritten");

    let model = folded_model(&surface);
    assert_eq!(model.rows().len(), 2);
    let frame = render_frame(&model, Viewport::default(), 50, 10);
    assert!(frame.contains("rewritten"));
    assert!(!frame.contains("original"));
}

#[test]
fn fallback_projection_covers_a_full_run() {
    let surface = FakeSurface::new();
    let board = JobBoard::new(Arc::new(surface.clone()));
    board.add_job("only", "solo job");
    board.set_active("only").expect("active");
    board.set_done("only").expect("done");
    board.set_status_text("finished");

    let lines = surface
        .commands()
        .iter()
        .map(fallback_line)
        .collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            "job=only line=[        ] solo job".to_string(),
            "job=only line=[  ACTIVE] solo job".to_string(),
            "job=only line=[    DONE] solo job".to_string(),
            "progress=100".to_string(),
            "status=Progress: 100 %".to_string(),
            "message=finished".to_string(),
        ]
    );
}
