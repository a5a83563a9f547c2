//! Array encodings of a position for external consumers such as a neural
//! network front end. Nothing in the rules engine reads them.

use crate::bitboard::Bitboard;
use crate::piece::Piece;
use crate::position::Position;

/// Twelve 8x8 one-hot planes, indexed `[piece][row][col]`.
pub type Planes = [[[u8; 8]; 8]; Piece::COUNT];

impl Position {
    /// One plane per piece in [`Piece::index`] order (White P N B R Q K, then
    /// Black). Row 0 is rank 8 and column 0 is the a-file, as the board is drawn.
    pub fn to_planes(&self) -> Planes {
        let mut planes = [[[0u8; 8]; 8]; Piece::COUNT];
        for (plane, bitboard) in planes.iter_mut().zip(self.piece_bitboards()) {
            for sq in bitboard {
                let index = sq.display_index();
                plane[index / 8][index % 8] = 1;
            }
        }
        planes
    }

    /// Occupancy of each piece, in the same piece order as [`Position::to_planes`].
    ///
    /// Unlike the planes, the bits use the engine's own layout: bit 0 is a1
    /// and bit 63 is h8. [`Square::display_index`](crate::Square::display_index)
    /// converts a square to the plane's row-major index.
    pub fn piece_bitboards(&self) -> [Bitboard; Piece::COUNT] {
        let mut boards = [Bitboard::EMPTY; Piece::COUNT];
        for piece in Piece::all() {
            boards[piece.index()] = self.colored(piece.kind, piece.color);
        }
        boards
    }
}

#[cfg(test)]
mod tests {
    use crate::piece::{Color, Piece, PieceKind};
    use crate::position::Position;

    #[test]
    fn starting_planes() {
        let planes = Position::starting().to_planes();
        let white_pawns = Piece::new(PieceKind::Pawn, Color::White).index();
        let black_king = Piece::new(PieceKind::King, Color::Black).index();
        assert_eq!(planes[white_pawns][6], [1; 8]);
        assert_eq!(planes[white_pawns][1], [0; 8]);
        assert_eq!(planes[black_king][0], [0, 0, 0, 0, 1, 0, 0, 0]);

        let total: u32 = planes.iter().flatten().flatten().map(|&v| u32::from(v)).sum();
        assert_eq!(total, 32);
    }

    #[test]
    fn bitboards_and_planes_use_different_layouts() {
        let position = Position::starting();
        let white_king = Piece::new(PieceKind::King, Color::White).index();
        // e1 is bit 4 in the bitboard, but row 7 column 4 in the planes.
        assert_eq!(position.piece_bitboards()[white_king].inner(), 1 << 4);
        let planes = position.to_planes();
        assert_eq!(planes[white_king][7][4], 1);
        assert_eq!(planes[white_king][0][4], 0);
    }

    #[test]
    fn bitboards_partition_occupancy() {
        let position: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .unwrap();
        let boards = position.piece_bitboards();
        let union = boards.iter().fold(crate::Bitboard::EMPTY, |acc, &b| acc | b);
        assert_eq!(union, position.occupied());
        assert_eq!(boards.iter().map(|b| b.count()).sum::<u32>(), position.occupied().count());
        assert_eq!(boards[Piece::new(PieceKind::Queen, Color::Black).index()].count(), 1);
    }
}
