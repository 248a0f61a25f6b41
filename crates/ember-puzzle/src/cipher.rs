//! Cipher transforms used to build cipher rounds.
//!
//! - **Shift**: rotate each letter through the alphabet (Caesar)
//! - **Substitution**: map letters through a fixed table
//! - **Transposition**: scramble the letters (anagram); random, so a round
//!   computes it once and keeps the result

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// The Russian alphabet, Ё included.
pub const RUSSIAN: &str = "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ";

/// Reshuffle attempts before accepting a scramble equal to the input.
const MAX_RESHUFFLES: usize = 8;

/// An ordered set of uppercase letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::russian()
    }
}

impl Alphabet {
    /// An alphabet from the given letters, in order.
    pub fn new(letters: &str) -> Self {
        Self {
            letters: letters.chars().collect(),
        }
    }

    /// [`RUSSIAN`].
    pub fn russian() -> Self {
        Self::new(RUSSIAN)
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Whether there are no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Position of `c` (compared in uppercase).
    pub fn position(&self, c: char) -> Option<usize> {
        let upper = to_upper(c);
        self.letters.iter().position(|&l| l == upper)
    }

    /// Rotate every letter by `offset` (negative rotates back). Letters come
    /// out uppercase; anything outside the alphabet is copied as is.
    pub fn shift(&self, text: &str, offset: i32) -> String {
        if self.is_empty() {
            return text.to_string();
        }
        let len = self.len() as i64;
        text.chars()
            .map(|c| match self.position(c) {
                Some(idx) => {
                    let shifted = (idx as i64 + i64::from(offset)).rem_euclid(len);
                    self.letters[shifted as usize]
                }
                None => c,
            })
            .collect()
    }
}

fn to_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Map each character through `table`; unmapped characters pass through.
pub fn substitute(text: &str, table: &BTreeMap<char, char>) -> String {
    text.chars()
        .map(|c| table.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Scramble the letters of `text` with whitespace removed.
///
/// Reshuffles a few times when the scramble happens to equal the input.
pub fn transpose<R: Rng>(text: &str, rng: &mut R) -> String {
    let original: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut letters = original.clone();
    for _ in 0..MAX_RESHUFFLES {
        letters.shuffle(rng);
        if letters != original {
            break;
        }
    }
    letters.into_iter().collect()
}

/// How a cipher round hides its plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CipherTransform {
    /// Caesar shift by `offset` letters.
    Shift {
        /// Letters to rotate forward.
        offset: i32,
    },
    /// Fixed letter substitution.
    Substitution {
        /// Plain letter to cipher letter.
        table: BTreeMap<char, char>,
    },
    /// Random letter scramble.
    Transposition,
}

impl CipherTransform {
    /// Encrypt `plaintext`. Only transposition consumes randomness.
    pub fn apply<R: Rng>(&self, plaintext: &str, alphabet: &Alphabet, rng: &mut R) -> String {
        match self {
            Self::Shift { offset } => alphabet.shift(plaintext, *offset),
            Self::Substitution { table } => substitute(plaintext, table),
            Self::Transposition => transpose(plaintext, rng),
        }
    }

    /// The one-line hint shown for this transform.
    pub fn hint(&self) -> String {
        match self {
            Self::Shift { offset } => format!("Это шифр Цезаря, сдвиг {offset}."),
            Self::Substitution { .. } => "Это шифр замены (таблица подстановки).".to_string(),
            Self::Transposition => "Это анаграмма: буквы перемешаны.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn house_table() -> BTreeMap<char, char> {
        [
            ('Ы', 'Е'),
            ('А', 'О'),
            ('Р', 'П'),
            ('И', 'К'),
            ('С', 'Й'),
            ('К', 'А'),
            ('Д', 'М'),
            ('В', 'Л'),
            ('М', 'С'),
            ('Й', 'Т'),
            ('О', 'Р'),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn russian_has_33_letters() {
        assert_eq!(Alphabet::russian().len(), 33);
    }

    #[test]
    fn caesar_examples() {
        let abc = Alphabet::russian();
        assert_eq!(abc.shift("ПРИВЕТ МИР", 3), "ТУЛЕЗХ ПЛУ");
        assert_eq!(abc.shift("ШИФРОВАНИЕ", 3), "ЫЛЧУСЕГРЛЗ");
        assert_eq!(abc.shift("ЯЖ", 1), "АЗ");
    }

    #[test]
    fn shift_uppercases_and_passes_others() {
        let abc = Alphabet::russian();
        assert_eq!(abc.shift("привет, 42!", 0), "ПРИВЕТ, 42!");
        assert_eq!(abc.shift("A-Z", 5), "A-Z");
    }

    #[test]
    fn substitution_table() {
        assert_eq!(substitute("КРАСИВЫЙ ДОМ", &house_table()), "АПОЙКЛЕТ МРС");
    }

    #[test]
    fn transposition_keeps_letters() {
        let mut rng = StdRng::seed_from_u64(3);
        let scrambled = transpose("БЛАГОРОДНЫЙ", &mut rng);
        let mut a: Vec<char> = scrambled.chars().collect();
        let mut b: Vec<char> = "БЛАГОРОДНЫЙ".chars().collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
        assert_ne!(scrambled, "БЛАГОРОДНЫЙ");
    }

    #[test]
    fn transposition_strips_whitespace() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(!transpose("КРАСИВЫЙ ДОМ", &mut rng).contains(' '));
    }

    #[test]
    fn single_letter_transposition_terminates() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(transpose("А", &mut rng), "А");
    }

    #[test]
    fn hints() {
        assert_eq!(
            CipherTransform::Shift { offset: 3 }.hint(),
            "Это шифр Цезаря, сдвиг 3."
        );
        assert!(CipherTransform::Transposition.hint().contains("анаграмма"));
    }

    #[test]
    fn transform_json_shape() {
        let t: CipherTransform =
            serde_json::from_str(r#"{ "type": "substitution", "table": { "А": "О" } }"#).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(t.apply("МАМА", &Alphabet::russian(), &mut rng), "МОМО");
    }

    proptest! {
        #[test]
        fn shift_round_trips(text in "[А-ЯЁ ]{0,24}", k in -100i32..100) {
            let abc = Alphabet::russian();
            let len = abc.len() as i32;
            let back = abc.shift(&abc.shift(&text, k), (-k).rem_euclid(len));
            prop_assert_eq!(back, text);
        }
    }
}
