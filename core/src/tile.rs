use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the gameplay engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    /// A mine that was dug.
    Exploded,
    /// An already revealed cell that was dug a second time.
    Scorched,
}

impl EngineCell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Exploded | Self::Scorched)
    }

    pub const fn view(self) -> CellView {
        match self {
            Self::Hidden => CellView::Hidden,
            Self::Flagged => CellView::Flagged,
            Self::Revealed(count) => CellView::Count(count),
            Self::Exploded => CellView::Mine,
            Self::Scorched => CellView::Lava,
        }
    }
}

/// Displayable value of one position, as seen by renderers and agents.
///
/// The integer codes are a stable contract: recorded neighborhoods are stored
/// as these numbers, so they must never be renumbered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellView {
    OutOfBounds,
    Hidden,
    Flagged,
    Mine,
    Lava,
    Count(u8),
}

impl CellView {
    pub const HIDDEN: i8 = -1;
    pub const FLAGGED: i8 = -2;
    pub const MINE: i8 = -3;
    pub const LAVA: i8 = -4;
    pub const OUT_OF_BOUNDS: i8 = -5;

    pub const fn code(self) -> i8 {
        match self {
            Self::OutOfBounds => Self::OUT_OF_BOUNDS,
            Self::Hidden => Self::HIDDEN,
            Self::Flagged => Self::FLAGGED,
            Self::Mine => Self::MINE,
            Self::Lava => Self::LAVA,
            Self::Count(count) => count as i8,
        }
    }

    pub const fn from_code(code: i8) -> Option<Self> {
        Some(match code {
            Self::OUT_OF_BOUNDS => Self::OutOfBounds,
            Self::HIDDEN => Self::Hidden,
            Self::FLAGGED => Self::Flagged,
            Self::MINE => Self::Mine,
            Self::LAVA => Self::Lava,
            0..=8 => Self::Count(code as u8),
            _ => return None,
        })
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::OutOfBounds => ' ',
            Self::Hidden => '.',
            Self::Flagged => 'F',
            Self::Mine => '#',
            Self::Lava => '~',
            Self::Count(0) => ' ',
            Self::Count(count) => (b'0' + count) as char,
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::OutOfBounds => "⬛",
            Self::Hidden => "🟦",
            Self::Flagged => "🚩",
            Self::Mine => "💥",
            Self::Lava => "🌋",
            Self::Count(0) => "⬜",
            Self::Count(1) => "1️⃣",
            Self::Count(2) => "2️⃣",
            Self::Count(3) => "3️⃣",
            Self::Count(4) => "4️⃣",
            Self::Count(5) => "5️⃣",
            Self::Count(6) => "6️⃣",
            Self::Count(7) => "7️⃣",
            Self::Count(_) => "8️⃣",
        }
    }
}

impl From<CellView> for i8 {
    fn from(view: CellView) -> Self {
        view.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_codes_are_stable() {
        assert_eq!(CellView::Hidden.code(), -1);
        assert_eq!(CellView::Flagged.code(), -2);
        assert_eq!(CellView::Mine.code(), -3);
        assert_eq!(CellView::Lava.code(), -4);
        assert_eq!(CellView::OutOfBounds.code(), -5);
        assert_eq!(CellView::Count(7).code(), 7);
    }

    #[test]
    fn codes_map_back_to_views() {
        for code in -5..=8 {
            let view = CellView::from_code(code).unwrap();
            assert_eq!(view.code(), code);
        }
        assert_eq!(CellView::from_code(-6), None);
        assert_eq!(CellView::from_code(9), None);
    }

    #[test]
    fn fatal_cells_render_as_mine_or_lava() {
        assert_eq!(EngineCell::Exploded.view(), CellView::Mine);
        assert_eq!(EngineCell::Scorched.view(), CellView::Lava);
        assert!(EngineCell::Scorched.is_fatal());
        assert!(!EngineCell::Revealed(0).is_fatal());
    }
}
