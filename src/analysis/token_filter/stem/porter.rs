//! Porter stemming algorithm implementation.
//!
//! This follows the reference implementation of the Porter (1980) algorithm
//! step by step, including its two published departures from the paper:
//! `-bli` is rewritten to `-ble` (instead of `-abli` to `-able`) and `-logi`
//! is rewritten to `-log` in step 2.
//!
//! # Algorithm
//!
//! 1. Plurals and `-ed`/`-ing` suffixes, then terminal `y` to `i`
//! 2. Double suffixes to single ones (`-ational` → `-ate`, ...)
//! 3. `-ic-`, `-full`, `-ness` and friends
//! 4. Removal of `-ant`, `-ence`, ... when the measure is above one
//! 5. Removal of a final `-e` and reduction of a final `-ll`
//!
//! Words of two characters or fewer are returned unchanged, as are words
//! containing non-ASCII characters. The input is expected to be lowercase.
//!
//! # Examples
//!
//! ```
//! use lexiclass::analysis::token_filter::stem::Stemmer;
//! use lexiclass::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("generalization"), "gener");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

/// Porter stemming algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        if word.len() <= 2 || !word.is_ascii() {
            return word.to_string();
        }

        let mut buffer = StemBuffer::new(word);
        buffer.step1ab();
        if buffer.k > 0 {
            buffer.step1c();
            buffer.step2();
            buffer.step3();
            buffer.step4();
            buffer.step5();
        }

        buffer.into_stem()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// Working state for a single word.
///
/// `b[0..=k]` is the current word. `j` marks the end of the stem left by the
/// last successful [`StemBuffer::ends`] call and may be `-1`.
struct StemBuffer {
    b: Vec<u8>,
    k: isize,
    j: isize,
}

impl StemBuffer {
    fn new(word: &str) -> Self {
        let b = word.as_bytes().to_vec();
        let k = b.len() as isize - 1;
        StemBuffer { b, k, j: 0 }
    }

    fn into_stem(self) -> String {
        self.b[..=self.k as usize].iter().map(|&c| c as char).collect()
    }

    fn at(&self, i: isize) -> u8 {
        self.b[i as usize]
    }

    /// True when `b[i]` is a consonant. `y` is a consonant at the start of
    /// the word or after a vowel.
    fn cons(&self, i: isize) -> bool {
        match self.at(i) {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// Number of consonant sequences between 0 and j, the `m` in `[C](VC)^m[V]`.
    fn measure(&self) -> usize {
        let mut n = 0;
        let mut i = 0;

        loop {
            if i > self.j {
                return n;
            }
            if !self.cons(i) {
                break;
            }
            i += 1;
        }
        i += 1;

        loop {
            loop {
                if i > self.j {
                    return n;
                }
                if self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
            n += 1;

            loop {
                if i > self.j {
                    return n;
                }
                if !self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..=self.j).any(|i| !self.cons(i))
    }

    fn double_consonant(&self, j: isize) -> bool {
        j >= 1 && self.at(j) == self.at(j - 1) && self.cons(j)
    }

    /// True when `i-2, i-1, i` is consonant-vowel-consonant and the last
    /// consonant is not `w`, `x` or `y`.
    fn cvc(&self, i: isize) -> bool {
        if i < 2 || !self.cons(i) || self.cons(i - 1) || !self.cons(i - 2) {
            return false;
        }
        !matches!(self.at(i), b'w' | b'x' | b'y')
    }

    /// Check whether `b[0..=k]` ends with `suffix`, setting `j` on success.
    fn ends(&mut self, suffix: &str) -> bool {
        let suffix = suffix.as_bytes();
        let len = suffix.len() as isize;
        if len > self.k + 1 {
            return false;
        }

        let start = (self.k - len + 1) as usize;
        if &self.b[start..=self.k as usize] != suffix {
            return false;
        }

        self.j = self.k - len;
        true
    }

    fn set_to(&mut self, replacement: &str) {
        self.b.truncate((self.j + 1) as usize);
        self.b.extend_from_slice(replacement.as_bytes());
        self.k = self.j + replacement.len() as isize;
    }

    fn replace_if_measured(&mut self, replacement: &str) {
        if self.measure() > 0 {
            self.set_to(replacement);
        }
    }

    /// Apply the first rule whose suffix matches; later rules are not tried.
    fn apply_first(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    fn step1ab(&mut self) {
        if self.at(self.k) == b's' {
            if self.ends("sses") {
                self.k -= 2;
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.at(self.k - 1) != b's' {
                self.k -= 1;
            }
        }

        if self.ends("eed") {
            if self.measure() > 0 {
                self.k -= 1;
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.k = self.j;
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.k) {
                self.k -= 1;
                if matches!(self.at(self.k), b'l' | b's' | b'z') {
                    self.k += 1;
                }
            } else if self.measure() == 1 && self.cvc(self.k) {
                self.set_to("e");
            }
        }
    }

    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let k = self.k as usize;
            self.b[k] = b'i';
        }
    }

    fn step2(&mut self) {
        let rules: &[(&str, &str)] = match self.at(self.k - 1) {
            b'a' => &[("ational", "ate"), ("tional", "tion")],
            b'c' => &[("enci", "ence"), ("anci", "ance")],
            b'e' => &[("izer", "ize")],
            b'l' => &[
                ("bli", "ble"),
                ("alli", "al"),
                ("entli", "ent"),
                ("eli", "e"),
                ("ousli", "ous"),
            ],
            b'o' => &[("ization", "ize"), ("ation", "ate"), ("ator", "ate")],
            b's' => &[
                ("alism", "al"),
                ("iveness", "ive"),
                ("fulness", "ful"),
                ("ousness", "ous"),
            ],
            b't' => &[("aliti", "al"), ("iviti", "ive"), ("biliti", "ble")],
            b'g' => &[("logi", "log")],
            _ => return,
        };
        self.apply_first(rules);
    }

    fn step3(&mut self) {
        let rules: &[(&str, &str)] = match self.at(self.k) {
            b'e' => &[("icate", "ic"), ("ative", ""), ("alize", "al")],
            b'i' => &[("iciti", "ic")],
            b'l' => &[("ical", "ic"), ("ful", "")],
            b's' => &[("ness", "")],
            _ => return,
        };
        self.apply_first(rules);
    }

    fn step4(&mut self) {
        let matched = match self.at(self.k - 1) {
            b'a' => self.ends("al"),
            b'c' => self.ends("ance") || self.ends("ence"),
            b'e' => self.ends("er"),
            b'i' => self.ends("ic"),
            b'l' => self.ends("able") || self.ends("ible"),
            b'n' => {
                self.ends("ant") || self.ends("ement") || self.ends("ment") || self.ends("ent")
            }
            b'o' => {
                (self.ends("ion") && self.j >= 0 && matches!(self.at(self.j), b's' | b't'))
                    || self.ends("ou")
            }
            b's' => self.ends("ism"),
            b't' => self.ends("ate") || self.ends("iti"),
            b'u' => self.ends("ous"),
            b'v' => self.ends("ive"),
            b'z' => self.ends("ize"),
            _ => false,
        };

        if matched && self.measure() > 1 {
            self.k = self.j;
        }
    }

    fn step5(&mut self) {
        self.j = self.k;
        if self.at(self.k) == b'e' {
            let m = self.measure();
            if m > 1 || (m == 1 && !self.cvc(self.k - 1)) {
                self.k -= 1;
            }
        }
        if self.at(self.k) == b'l' && self.double_consonant(self.k) && self.measure() > 1 {
            self.k -= 1;
        }
    }
}
