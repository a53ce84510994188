use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Source of the random choices used to place mines.
pub trait MineSource {
    /// Returns an index drawn uniformly from `0..upper`. `upper` is never zero.
    fn choose(&mut self, upper: usize) -> usize;
}

/// Draws `config.mines()` distinct cells with a partial Fisher-Yates shuffle over row-major indices.
pub fn generate(config: GameConfig, source: &mut impl MineSource) -> MineLayout {
    let total_cells = usize::from(config.total_cells());
    let mines = usize::from(config.mines());

    let mut indices: Vec<usize> = (0..total_cells).collect();
    for i in 0..mines {
        let pick = i + source.choose(total_cells - i).min(total_cells - i - 1);
        indices.swap(i, pick);
    }

    let cols = usize::from(config.size().1);
    let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
    for &index in &indices[..mines] {
        mine_mask[[index / cols, index % cols]] = true;
    }

    let layout = MineLayout::from_mine_mask(mine_mask);
    if layout.mine_count() != config.mines() {
        log::warn!(
            "Generated layout count mismatch, actual: {}, requested: {}",
            layout.mine_count(),
            config.mines()
        );
    }
    layout
}
