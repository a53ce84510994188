use core::fmt;

use crate::*;

/// Column header letters that never pair up into a flag glyph when printed side by side.
const COLUMN_HEADERS: [char; 8] = ['I', 'J', 'K', 'L', 'N', 'Q', 'R', 'T'];

const MAX_HEADED_ROWS: Coord = 26;

fn regional_indicator(letter: char) -> char {
    let offset = u32::from(letter) - u32::from('A');
    char::from_u32(0x1F1E6 + offset).unwrap_or(letter)
}

impl Board {
    fn views(&self) -> impl Iterator<Item = impl Iterator<Item = CellView> + '_> + '_ {
        let (rows, cols) = self.size();
        (0..rows).map(move |row| (0..cols).map(move |col| self.cell_at((row, col)).view()))
    }

    /// Renders the board as emoji, with letter headers when the board is small enough to label.
    pub fn to_emoji(&self) -> String {
        let (rows, cols) = self.size();
        let headed = rows <= MAX_HEADED_ROWS && usize::from(cols) <= COLUMN_HEADERS.len();

        let mut out = String::new();
        if headed {
            out.push('⬛');
            out.extend(COLUMN_HEADERS[..usize::from(cols)].iter().map(|&c| regional_indicator(c)));
            out.push('\n');
        }
        for (row, views) in self.views().enumerate() {
            if headed {
                out.push(regional_indicator((b'A' + row as u8) as char));
            }
            for view in views {
                out.push_str(view.emoji());
            }
            out.push('\n');
        }
        out
    }
}

/// Plain text grid, one line per row.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for views in self.views() {
            let line: Vec<String> = views.map(|view| view.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" ").trim_end())?;
        }
        Ok(())
    }
}
