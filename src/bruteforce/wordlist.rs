//! Lazy candidate password sequences
//!
//! A `Wordlist` never materialises its candidates: it holds a cursor and
//! produces one string per `next()`. The exhaustive level is far too large to
//! finish, consumers are expected to stop early.

use std::fmt;
use std::str::FromStr;

use crate::catalog;

/// Printable symbols of the exhaustive sweep: letters, digits, punctuation
pub const EXHAUSTIVE_CHARSET: &str = concat!(
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
);

/// Shortest candidate of the exhaustive sweep
pub const EXHAUSTIVE_MIN_LEN: usize = 4;
/// Longest candidate of the exhaustive sweep
pub const EXHAUSTIVE_MAX_LEN: usize = 8;
/// Numeric affixes 0..NUMERIC_AFFIXES are tried around each word
pub const NUMERIC_AFFIXES: usize = 100;

/// Wordlist complexity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Complexity {
    /// Plain dictionary words
    Dictionary,
    /// Dictionary words with 0-99 numeric suffixes and prefixes
    Numeric,
    /// Every printable string of length 4 to 8
    Exhaustive,
}

impl Complexity {
    /// Numeric level, 1 to 3
    pub fn level(self) -> u8 {
        match self {
            Complexity::Dictionary => 1,
            Complexity::Numeric => 2,
            Complexity::Exhaustive => 3,
        }
    }

    /// Map a numeric level; anything above 2 is exhaustive
    pub fn from_level(level: u8) -> Self {
        match level {
            0 | 1 => Complexity::Dictionary,
            2 => Complexity::Numeric,
            _ => Complexity::Exhaustive,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Complexity::Dictionary => "dictionary",
            Complexity::Numeric => "numeric",
            Complexity::Exhaustive => "exhaustive",
        };
        f.write_str(name)
    }
}

impl FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dictionary" | "basic" => Ok(Complexity::Dictionary),
            "numeric" | "numbers" => Ok(Complexity::Numeric),
            "exhaustive" | "bruteforce" => Ok(Complexity::Exhaustive),
            other => match other.parse::<u8>() {
                Ok(level @ 1..=3) => Ok(Complexity::from_level(level)),
                _ => Err(format!("Unknown wordlist level: {}", s)),
            },
        }
    }
}

/// Cursor position within a level
#[derive(Debug, Clone)]
enum Cursor {
    Dictionary { word: usize },
    /// `step` 0 is the bare word, then suffix/prefix pairs per affix
    Numeric { word: usize, step: usize },
    /// Odometer over `EXHAUSTIVE_CHARSET`, last index turning fastest
    Exhaustive { indices: Vec<usize> },
    Done,
}

/// Restartable lazy password candidate sequence
#[derive(Debug, Clone)]
pub struct Wordlist {
    complexity: Complexity,
    words: &'static [&'static str],
    charset: Vec<char>,
    cursor: Cursor,
}

impl Wordlist {
    /// Wordlist over the built-in common password dictionary
    pub fn new(complexity: Complexity) -> Self {
        Self::with_words(complexity, catalog::get_common_passwords())
    }

    /// Wordlist over a caller-provided dictionary
    pub fn with_words(complexity: Complexity, words: &'static [&'static str]) -> Self {
        let mut wordlist = Self {
            complexity,
            words,
            charset: EXHAUSTIVE_CHARSET.chars().collect(),
            cursor: Cursor::Done,
        };
        wordlist.reset();
        wordlist
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    /// Rewind to the first candidate
    pub fn reset(&mut self) {
        self.cursor = match self.complexity {
            Complexity::Dictionary => Cursor::Dictionary { word: 0 },
            Complexity::Numeric => Cursor::Numeric { word: 0, step: 0 },
            Complexity::Exhaustive => Cursor::Exhaustive {
                indices: vec![0; EXHAUSTIVE_MIN_LEN],
            },
        };
    }

    /// Total number of candidates the sequence yields from the start
    pub fn total_candidates(&self) -> u128 {
        match self.complexity {
            Complexity::Dictionary => self.words.len() as u128,
            Complexity::Numeric => (self.words.len() * (1 + 2 * NUMERIC_AFFIXES)) as u128,
            Complexity::Exhaustive => {
                let base = self.charset.len() as u128;
                (EXHAUSTIVE_MIN_LEN..=EXHAUSTIVE_MAX_LEN)
                    .map(|len| base.pow(len as u32))
                    .sum()
            }
        }
    }

    fn next_numeric(&mut self, word: usize, step: usize) -> Option<String> {
        let base = self.words.get(word)?;
        let candidate = if step == 0 {
            (*base).to_string()
        } else {
            let affix = (step - 1) / 2;
            if (step - 1) % 2 == 0 {
                format!("{}{}", base, affix)
            } else {
                format!("{}{}", affix, base)
            }
        };

        self.cursor = if step == 2 * NUMERIC_AFFIXES {
            Cursor::Numeric { word: word + 1, step: 0 }
        } else {
            Cursor::Numeric { word, step: step + 1 }
        };
        Some(candidate)
    }
}

/// Advance an odometer; false once every position has wrapped
fn advance(indices: &mut [usize], radix: usize) -> bool {
    for slot in indices.iter_mut().rev() {
        *slot += 1;
        if *slot < radix {
            return true;
        }
        *slot = 0;
    }
    false
}

impl Iterator for Wordlist {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Dictionary { word } => {
                let candidate = self.words.get(word)?;
                self.cursor = Cursor::Dictionary { word: word + 1 };
                Some((*candidate).to_string())
            }
            Cursor::Numeric { word, step } => self.next_numeric(word, step),
            Cursor::Exhaustive { mut indices } => {
                if self.charset.is_empty() {
                    return None;
                }
                let candidate: String = indices.iter().map(|&i| self.charset[i]).collect();

                if !advance(&mut indices, self.charset.len()) {
                    let len = indices.len() + 1;
                    if len > EXHAUSTIVE_MAX_LEN {
                        return Some(candidate);
                    }
                    indices = vec![0; len];
                }
                self.cursor = Cursor::Exhaustive { indices };
                Some(candidate)
            }
            Cursor::Done => None,
        }
    }
}
