//! Forsyth-Edwards Notation for [`Position`].

use std::fmt;
use std::str::FromStr;

use crate::castling::CastlingRights;
use crate::error::FenError;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;
use crate::square::{File, Rank, Square};

/// The standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Position {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let [placement, active, castling, en_passant, halfmove, fullmove] = fields[..] else {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        };

        let mut position = Position::empty();
        place_pieces(&mut position, placement)?;

        let side_to_move = match active {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };
        position.set_side_to_move(side_to_move);
        position.set_castling(CastlingRights::from_fen(castling)?);
        position.set_en_passant(parse_en_passant(&position, en_passant)?);

        let halfmove_clock = parse_counter(halfmove, "halfmove clock")?;
        let fullmove_number = parse_counter(fullmove, "fullmove number")?;
        if fullmove_number == 0 {
            return Err(FenError::InvalidMoveCounter {
                field: "fullmove number",
                found: fullmove.to_string(),
            });
        }
        position.set_counters(halfmove_clock, fullmove_number);

        position.validate()?;
        Ok(position)
    }
}

fn place_pieces(position: &mut Position, placement: &str) -> Result<(), FenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::WrongRankCount { found: rows.len() });
    }

    for (row, (text, rank)) in rows.iter().zip(Rank::ALL.into_iter().rev()).enumerate() {
        let mut file = 0usize;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            let Some(file_of) = File::from_index(file as u8) else {
                return Err(FenError::BadRankLength { rank: row, length: file + 1 });
            };
            position.toggle(Square::new(rank, file_of), piece);
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankLength { rank: row, length: file });
        }
    }
    Ok(())
}

/// Accept an en passant square only where a double push could just have landed.
fn parse_en_passant(position: &Position, field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let invalid = || FenError::InvalidEnPassant {
        found: field.to_string(),
    };
    let target = Square::from_algebraic(field).ok_or_else(invalid)?;
    let mover = position.side_to_move();
    let (target_rank, toward_pusher) = match mover {
        Color::White => (Rank::R6, -1),
        Color::Black => (Rank::R3, 1),
    };
    if target.rank() != target_rank {
        return Err(invalid());
    }
    let pushed = target.offset(toward_pusher, 0).ok_or_else(invalid)?;
    let origin = target.offset(-toward_pusher, 0).ok_or_else(invalid)?;
    let pawn_there = position.piece_at(pushed) == Some(Piece::new(PieceKind::Pawn, !mover));
    let path_empty = !position.occupied().contains(target) && !position.occupied().contains(origin);
    if !pawn_there || !path_empty {
        return Err(invalid());
    }
    Ok(Some(target))
}

fn parse_counter(field: &str, name: &'static str) -> Result<u16, FenError> {
    field.parse().map_err(|_| FenError::InvalidMoveCounter {
        field: name,
        found: field.to_string(),
    })
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rank) in Rank::ALL.into_iter().rev().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            let mut empty = 0;
            for file in File::ALL {
                match self.piece_at(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }

        write!(f, " {} {} ", self.side_to_move().fen_char(), self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}

#[cfg(test)]
mod tests {
    use super::STARTING_FEN;
    use crate::error::{BoardError, FenError};
    use crate::position::Position;

    const ROUND_TRIP: [&str; 6] = [
        STARTING_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        "8/8/8/8/8/8/8/k1K5 b - - 99 170",
    ];

    #[test]
    fn round_trips() {
        for fen in ROUND_TRIP {
            let position: Position = fen.parse().unwrap();
            assert_eq!(position.to_string(), fen);
            assert_eq!(position.to_string().parse::<Position>().unwrap(), position);
        }
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let position: Position = "  4k3/8/8/8/8/8/8/4K3   w - -  0 1 ".parse().unwrap();
        assert_eq!(position.to_string(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    fn err(fen: &str) -> FenError {
        fen.parse::<Position>().unwrap_err()
    }

    #[test]
    fn structural_errors() {
        assert_eq!(err("4k3/8/8/8/8/8/8/4K3 w - - 0"), FenError::WrongFieldCount { found: 5 });
        assert_eq!(err("4k3/8/8/8/8/8/4K3 w - - 0 1"), FenError::WrongRankCount { found: 7 });
        assert_eq!(err("4k3/8/8/8/8/8/8/4K2 w - - 0 1"), FenError::BadRankLength { rank: 7, length: 7 });
        assert_eq!(err("4k4/8/8/8/8/8/8/4K3 w - - 0 1"), FenError::BadRankLength { rank: 0, length: 9 });
        assert_eq!(err("4k2R1/8/8/8/8/8/8/4K3 w - - 0 1"), FenError::BadRankLength { rank: 0, length: 9 });
        assert_eq!(err("4k3/8/8/8/8/8/8/4X3 w - - 0 1"), FenError::InvalidPieceChar { character: 'X' });
        assert_eq!(err("4k3/8/8/8/8/8/8/0K7 w - - 0 1"), FenError::InvalidPieceChar { character: '0' });
    }

    #[test]
    fn field_errors() {
        assert!(matches!(err("4k3/8/8/8/8/8/8/4K3 x - - 0 1"), FenError::InvalidColor { .. }));
        assert!(matches!(err("4k3/8/8/8/8/8/8/4K3 w KX - 0 1"), FenError::InvalidCastling { .. }));
        assert!(matches!(err("4k3/8/8/8/8/8/8/4K3 w - e9 0 1"), FenError::InvalidEnPassant { .. }));
        assert!(matches!(
            err("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
            FenError::InvalidMoveCounter { field: "halfmove clock", .. }
        ));
        assert!(matches!(
            err("4k3/8/8/8/8/8/8/4K3 w - - 0 0"),
            FenError::InvalidMoveCounter { field: "fullmove number", .. }
        ));
    }

    #[test]
    fn en_passant_must_follow_a_double_push() {
        // Wrong rank for the side to move.
        assert!(matches!(err("4k3/8/8/3pP3/8/8/8/4K3 w - d3 0 1"), FenError::InvalidEnPassant { .. }));
        // No pawn in front of the target.
        assert!(matches!(err("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1"), FenError::InvalidEnPassant { .. }));
        // Origin square occupied.
        assert!(matches!(err("4k3/3n4/8/3pP3/8/8/8/4K3 w - d6 0 1"), FenError::InvalidEnPassant { .. }));
        let ok: Position = "4k3/3n4/8/3pP3/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(ok.en_passant(), None);
    }

    #[test]
    fn board_errors() {
        assert_eq!(
            err("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            FenError::InvalidBoard(BoardError::InvalidKingCount {
                color: crate::piece::Color::Black,
                count: 0
            })
        );
        assert_eq!(
            err("4k3/8/8/8/8/8/8/P3K3 w - - 0 1"),
            FenError::InvalidBoard(BoardError::PawnsOnBackRank)
        );
        assert_eq!(
            err("4k2R/8/8/8/8/8/8/4K3 w - - 0 1"),
            FenError::InvalidBoard(BoardError::OpponentInCheck)
        );
        assert_eq!(
            err("4k3/8/8/8/8/8/8/4K3 w K - 0 1"),
            FenError::InvalidBoard(BoardError::CastlingWithoutPieces { right: 'K' })
        );
    }
}
