//! Parsing typed input into actions.

use crate::error::MoveError;
use crate::game::GameKind;
use crate::mark::Cell;
use crate::moves::Action;

/// Input shape a variant expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// `row col`
    Cell,
    /// `letter row col`
    Letter,
    /// `number row col`
    Number,
    /// `column`
    Column,
    /// `from_row from_col to_row to_col`
    Slide,
}

impl InputShape {
    /// Shape used by `kind`.
    pub fn of(kind: GameKind) -> Self {
        match kind {
            GameKind::Sus | GameKind::Word => InputShape::Letter,
            GameKind::Numerical => InputShape::Number,
            GameKind::ConnectFour => InputShape::Column,
            GameKind::FourByFour => InputShape::Slide,
            _ => InputShape::Cell,
        }
    }
}

/// Prompt text describing what to type for `kind`.
pub fn input_hint(kind: GameKind) -> &'static str {
    match InputShape::of(kind) {
        InputShape::Cell => "Enter row and column, e.g. `1 2`",
        InputShape::Letter if kind == GameKind::Sus => "Enter S or U, then row and column, e.g. `S 1 2`",
        InputShape::Letter => "Enter a letter, then row and column, e.g. `A 1 2`",
        InputShape::Number => "Enter your number, then row and column, e.g. `5 1 1`",
        InputShape::Column => "Enter a column number, e.g. `3`",
        InputShape::Slide => "Enter the token's row and column, then the target's, e.g. `0 1 1 1`",
    }
}

/// Parses one line of input into the action `kind` expects.
///
/// Separators may be spaces or commas. Rule checks (bounds, occupancy,
/// symbols) are left to the game.
pub fn parse_action(kind: GameKind, input: &str) -> Result<Action, MoveError> {
    let parts: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .collect();
    let shape = InputShape::of(kind);
    let expected = match shape {
        InputShape::Column => 1,
        InputShape::Cell => 2,
        InputShape::Letter | InputShape::Number => 3,
        InputShape::Slide => 4,
    };
    if parts.len() != expected {
        return Err(MoveError::InvalidInput(format!(
            "expected {} value(s), got {}. {}",
            expected,
            parts.len(),
            input_hint(kind)
        )));
    }

    match shape {
        InputShape::Column => Ok(Action::Drop {
            column: index(parts[0])?,
        }),
        InputShape::Cell => Ok(Action::Place(cell(parts[0], parts[1])?)),
        InputShape::Letter => {
            let mut chars = parts[0].chars();
            let (Some(letter), None) = (chars.next(), chars.next()) else {
                return Err(MoveError::InvalidInput(format!(
                    "'{}' is not a single letter",
                    parts[0]
                )));
            };
            Ok(Action::Letter {
                cell: cell(parts[1], parts[2])?,
                letter: letter.to_ascii_uppercase(),
            })
        }
        InputShape::Number => {
            let value = parts[0]
                .parse::<i64>()
                .map_err(|_| MoveError::InvalidInput(format!("'{}' is not a number", parts[0])))?;
            let value = u8::try_from(value)
                .ok()
                .filter(|v| (1..=9).contains(v))
                .ok_or_else(|| {
                    MoveError::InvalidSymbol(format!("{} is not a number from 1 to 9", value))
                })?;
            Ok(Action::Number {
                cell: cell(parts[1], parts[2])?,
                value,
            })
        }
        InputShape::Slide => Ok(Action::Slide {
            from: cell(parts[0], parts[1])?,
            to: cell(parts[2], parts[3])?,
        }),
    }
}

fn index(text: &str) -> Result<usize, MoveError> {
    text.parse::<usize>()
        .map_err(|_| MoveError::InvalidInput(format!("'{}' is not a board index", text)))
}

fn cell(row: &str, col: &str) -> Result<Cell, MoveError> {
    Ok(Cell::new(index(row)?, index(col)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_with_comma_or_spaces() {
        let expected = Action::Place(Cell::new(1, 2));
        assert_eq!(parse_action(GameKind::Misere, "1 2"), Ok(expected));
        assert_eq!(parse_action(GameKind::Misere, " 1,2 "), Ok(expected));
    }

    #[test]
    fn test_letter_is_upper_cased() {
        assert_eq!(
            parse_action(GameKind::Word, "q 0 0"),
            Ok(Action::Letter {
                cell: Cell::new(0, 0),
                letter: 'Q'
            })
        );
    }

    #[test]
    fn test_wrong_arity_and_garbage() {
        assert!(matches!(
            parse_action(GameKind::ConnectFour, "1 2"),
            Err(MoveError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_action(GameKind::Pyramid, "a b"),
            Err(MoveError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_action(GameKind::Sus, "SU 0 0"),
            Err(MoveError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_action(GameKind::Diamond, "-1 3"),
            Err(MoveError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_slide_and_drop() {
        assert_eq!(
            parse_action(GameKind::FourByFour, "0 1 1 1"),
            Ok(Action::Slide {
                from: Cell::new(0, 1),
                to: Cell::new(1, 1)
            })
        );
        assert_eq!(
            parse_action(GameKind::ConnectFour, "6"),
            Ok(Action::Drop { column: 6 })
        );
    }

    #[test]
    fn test_number_out_of_range_is_invalid_symbol() {
        for input in ["300 0 0", "-1 0 0", "0 1 1", "10 2 2"] {
            assert!(
                matches!(
                    parse_action(GameKind::Numerical, input),
                    Err(MoveError::InvalidSymbol(_))
                ),
                "{}",
                input
            );
        }
        assert!(matches!(
            parse_action(GameKind::Numerical, "five 0 0"),
            Err(MoveError::InvalidInput(_))
        ));
        assert_eq!(
            parse_action(GameKind::Numerical, "9 2 2"),
            Ok(Action::Number {
                cell: Cell::new(2, 2),
                value: 9
            })
        );
    }
}
