use lsp_types::Position;

/// Convert 1-based line/character to 0-based LSP Position
pub fn to_lsp_position(line: u32, character: u32) -> Position {
    Position {
        line: line.saturating_sub(1),
        character: character.saturating_sub(1),
    }
}

/// Convert 0-based LSP Position to 1-based line/character
pub fn from_lsp_position(position: Position) -> (u32, u32) {
    (position.line + 1, position.character + 1)
}
