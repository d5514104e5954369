//! Gallery assembly: filter controls above a responsive grid of cards

use pythia_common::tree::{container, grid, Node};

/// Columns per breakpoint, narrowest first
pub const GRID_COLUMNS: [u32; 4] = [1, 1, 2, 3];

/// Pair the controls with a grid holding `cards` in the given order
pub fn assemble_gallery(controls: Node, cards: Vec<Node>) -> Node {
    container(vec![controls, grid(&GRID_COLUMNS, cards)])
}
