use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect_toot_ai::{Board, Cell, Marker, Placement, WIDTH};

fn glyph(cell: Cell) -> String {
    match cell.marker() {
        Some(Marker::Letter(letter)) => letter.as_char().to_string(),
        _ => "O".to_string(),
    }
}

/// Draws the board to stdout, underlining the last placed piece
pub fn display(board: &Board, last: Option<Placement>) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for (row, cells) in board.rows().iter().enumerate() {
        for (column, &cell) in cells.iter().enumerate() {
            let mut content = style(glyph(cell))
                .attribute(Attribute::Bold)
                .on(Color::DarkBlue)
                .with(match cell {
                    Cell::PlayerOne(_) => Color::Red,
                    Cell::PlayerTwo(_) => Color::Yellow,
                    Cell::Empty => Color::DarkBlue,
                });
            if last.map_or(false, |p| p.row == row && p.column == column) {
                content = content.attribute(Attribute::Underlined);
            }
            stdout.queue(PrintStyledContent(content))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
