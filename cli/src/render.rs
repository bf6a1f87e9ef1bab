use sweeper_core::*;

fn face(outcome: GameOutcome) -> &'static str {
    match outcome {
        GameOutcome::NotStarted => "...",
        GameOutcome::Ongoing => ":)",
        GameOutcome::Win => ":D",
        GameOutcome::Loss => "X(",
    }
}

fn glyph(tile: TileState, outcome: GameOutcome) -> char {
    if tile.revealed {
        return match (tile.content, tile.adjacent_mines) {
            (TileContent::Mine, _) => '*',
            (TileContent::Empty, 0) => ' ',
            (TileContent::Empty, count) => char::from(b'0' + count),
        };
    }
    if tile.flagged {
        return 'F';
    }
    match (outcome, tile.content) {
        (GameOutcome::Loss, TileContent::Mine) => '*',
        (GameOutcome::Win, TileContent::Mine) => 'F',
        _ => '.',
    }
}

/// Text view of the game: mine counter and face, then one line per row.
pub(crate) fn render(game: &Game) -> String {
    let summary = game.summary();
    let (rows, cols) = game.config().size;
    let counter = match summary.outcome {
        GameOutcome::Win => 0,
        _ => summary.remaining_flags,
    };

    let mut out = String::new();
    out.push_str(&format!("{counter:>4}  {}\n", face(summary.outcome)));
    for row in 0..rows {
        out.push_str(&format!("{row:>3} "));
        for col in 0..cols {
            let cell = match game.board() {
                Some(board) => glyph(board.tile_at((row, col)), summary.outcome),
                None => '.',
            };
            out.push(cell);
        }
        out.push('\n');
    }
    out
}
