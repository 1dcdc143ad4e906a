use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GameAction(Action),
    Restart,
    Quit,
    Unknown(String),
}

/// Turns text lines into commands for a level with `ndim` axes
///
/// `+k` / `-k` step along axis `k`. On 2D levels `w`/`s` move along axis 0
/// and `a`/`d` along axis 1, matching a row/column layout.
pub struct CommandParser {
    ndim: usize,
}

impl CommandParser {
    pub fn new(ndim: usize) -> Self {
        Self { ndim }
    }

    pub fn parse(&self, line: &str) -> Command {
        let input = line.trim();
        let unknown = || Command::Unknown(input.to_string());

        match input.to_ascii_lowercase().as_str() {
            "" | "." => return Command::GameAction(Action::Continue),
            "q" | "quit" | "exit" => return Command::Quit,
            "r" | "restart" => return Command::Restart,
            "w" if self.ndim == 2 => return self.moving(Direction::negative(0)),
            "s" if self.ndim == 2 => return self.moving(Direction::positive(0)),
            "a" if self.ndim == 2 => return self.moving(Direction::negative(1)),
            "d" if self.ndim == 2 => return self.moving(Direction::positive(1)),
            _ => {}
        }

        let mut chars = input.chars();
        let sign = chars.next();
        let axis: usize = match chars.as_str().parse() {
            Ok(axis) if axis < self.ndim => axis,
            _ => return unknown(),
        };
        match sign {
            Some('+') => self.moving(Direction::positive(axis)),
            Some('-') => self.moving(Direction::negative(axis)),
            _ => unknown(),
        }
    }

    fn moving(&self, direction: Direction) -> Command {
        Command::GameAction(Action::Move(direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving(direction: Direction) -> Command {
        Command::GameAction(Action::Move(direction))
    }

    #[test]
    fn test_axis_commands() {
        let parser = CommandParser::new(4);

        assert_eq!(parser.parse("+0"), moving(Direction::positive(0)));
        assert_eq!(parser.parse("-3"), moving(Direction::negative(3)));
        assert_eq!(parser.parse("  +2\n"), moving(Direction::positive(2)));
    }

    #[test]
    fn test_axis_out_of_range() {
        let parser = CommandParser::new(2);
        assert_eq!(parser.parse("+2"), Command::Unknown("+2".to_string()));
        assert_eq!(parser.parse("*1"), Command::Unknown("*1".to_string()));
        assert_eq!(parser.parse("+x"), Command::Unknown("+x".to_string()));
        assert_eq!(parser.parse("é1"), Command::Unknown("é1".to_string()));
    }

    #[test]
    fn test_wasd_keys() {
        let parser = CommandParser::new(2);

        assert_eq!(parser.parse("w"), moving(Direction::negative(0)));
        assert_eq!(parser.parse("a"), moving(Direction::negative(1)));
        assert_eq!(parser.parse("s"), moving(Direction::positive(0)));
        assert_eq!(parser.parse("D"), moving(Direction::positive(1)));
    }

    #[test]
    fn test_wasd_only_on_2d_levels() {
        let parser = CommandParser::new(3);
        assert_eq!(parser.parse("w"), Command::Unknown("w".to_string()));
    }

    #[test]
    fn test_controls() {
        let parser = CommandParser::new(2);

        assert_eq!(parser.parse("q"), Command::Quit);
        assert_eq!(parser.parse("QUIT"), Command::Quit);
        assert_eq!(parser.parse("r"), Command::Restart);
        assert_eq!(parser.parse(""), Command::GameAction(Action::Continue));
        assert_eq!(parser.parse("."), Command::GameAction(Action::Continue));
    }
}
