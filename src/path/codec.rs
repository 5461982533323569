//! Parsing and serializing the `d` attribute of a `<path>`.
//!
//! The parser is deliberately permissive: generated paths often carry stray
//! tokens, and anything that is not a finite number is simply dropped.

use std::fmt;

/// The ten SVG path command families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalTo,
    VerticalTo,
    CubicTo,
    SmoothCubicTo,
    QuadTo,
    SmoothQuadTo,
    ArcTo,
    ClosePath,
}

impl CommandKind {
    /// Map a command letter to its kind and absolute flag.
    pub fn from_letter(letter: char) -> Option<(Self, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => Self::MoveTo,
            'L' => Self::LineTo,
            'H' => Self::HorizontalTo,
            'V' => Self::VerticalTo,
            'C' => Self::CubicTo,
            'S' => Self::SmoothCubicTo,
            'Q' => Self::QuadTo,
            'T' => Self::SmoothQuadTo,
            'A' => Self::ArcTo,
            'Z' => Self::ClosePath,
            _ => return None,
        };
        Some((kind, letter.is_ascii_uppercase()))
    }

    pub fn letter(self, absolute: bool) -> char {
        let upper = match self {
            Self::MoveTo => 'M',
            Self::LineTo => 'L',
            Self::HorizontalTo => 'H',
            Self::VerticalTo => 'V',
            Self::CubicTo => 'C',
            Self::SmoothCubicTo => 'S',
            Self::QuadTo => 'Q',
            Self::SmoothQuadTo => 'T',
            Self::ArcTo => 'A',
            Self::ClosePath => 'Z',
        };
        if absolute { upper } else { upper.to_ascii_lowercase() }
    }

    /// Number of values consumed by one repetition of this command.
    pub fn arity(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo | Self::SmoothQuadTo => 2,
            Self::HorizontalTo | Self::VerticalTo => 1,
            Self::CubicTo => 6,
            Self::SmoothCubicTo | Self::QuadTo => 4,
            Self::ArcTo => 7,
            Self::ClosePath => 0,
        }
    }
}

/// One command letter with all of the values that followed it.
///
/// Repeated groups (`L 1 2 3 4`) stay in a single command; the resolver walks
/// them group by group. Values are kept at full `f64` precision so that
/// rewriting one point leaves every other number's text unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub kind: CommandKind,
    pub absolute: bool,
    pub values: Vec<f64>,
}

impl PathCommand {
    pub fn new(kind: CommandKind, absolute: bool, values: Vec<f64>) -> Self {
        Self { kind, absolute, values }
    }

    pub fn letter(&self) -> char {
        self.kind.letter(self.absolute)
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// Split a path string into commands.
pub fn parse_path(d: &str) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    let mut current: Option<(CommandKind, bool, usize)> = None;

    for (offset, ch) in d.char_indices() {
        let Some((kind, absolute)) = CommandKind::from_letter(ch) else {
            continue;
        };
        if let Some((prev_kind, prev_abs, start)) = current.take() {
            commands.push(PathCommand::new(prev_kind, prev_abs, parse_numbers(&d[start..offset])));
        }
        current = Some((kind, absolute, offset + ch.len_utf8()));
    }
    if let Some((kind, absolute, start)) = current {
        commands.push(PathCommand::new(kind, absolute, parse_numbers(&d[start..])));
    }
    commands
}

fn parse_numbers(raw: &str) -> Vec<f64> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .collect()
}

/// Join commands back into a `d` string, one letter per command.
///
/// Values are written as they were parsed, including stray values after `Z`
/// (`Z 5 5` comes back as `Z5 5`). Renderers ignore them either way.
pub fn serialize_path(commands: &[PathCommand]) -> String {
    commands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
