//! Lyric batch transformations
//!
//! Rest conversion, kana-aware affix stripping, and re-distribution of a
//! lyric line across the score's notes. Lyric changes shift consonant
//! timing, so each transform refreshes the auto-fit parameters before
//! returning.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ScoreError;
use crate::models::note::{Note, REST_LYRIC};
use crate::timing;

use super::BatchTransform;

/// Any hiragana/katakana run (ー attaches to the preceding mora)
static KANA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ぁ-んァ-ヶー]").unwrap());
/// Non-kana tail, e.g. a `_C4` pitch suffix or voice-color tag
static TRAILING_NON_KANA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^ぁ-んァ-ヶー]+$").unwrap());
/// Non-kana head, e.g. a VCV vowel prefix or voice-color tag
static LEADING_NON_KANA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^ぁ-んァ-ヶー]+").unwrap());

/// Small kana that merge with the preceding character into one mora
fn is_small_kana(c: char) -> bool {
    "ぁぃぅぇぉゃゅょゎァィゥェォャュョヮ".contains(c)
}

/// Split kana text into morae; digraphs with small kana ("きゃ") and the
/// long-vowel mark stay attached to their base character
pub fn split_morae(text: &str) -> Vec<String> {
    let mut morae: Vec<String> = Vec::new();
    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        match morae.last_mut() {
            Some(last) if is_small_kana(c) || c == 'ー' => last.push(c),
            _ => morae.push(c.to_string()),
        }
    }
    morae
}

/// Split a lyric line into syllables: kana text by morae, Latin text on
/// whitespace
pub fn split_syllables(text: &str) -> Vec<String> {
    if KANA.is_match(text) {
        split_morae(text)
    } else {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// The vowel class of a kana character, for VCV alias construction
pub(crate) fn kana_vowel(c: char) -> Option<char> {
    const A: &str = "あかがさざただなはばぱまやらわゃぁアカガサザタダナハバパマヤラワャ";
    const I: &str = "いきぎしじちぢにひびぴみりぃイキギシジチヂニヒビピミリィ";
    const U: &str = "うくぐすずつづぬふぶぷむゆるゅぅゔウクグスズツヅヌフブプムユルュゥヴ";
    const E: &str = "えけげせぜてでねへべぺめれぇエケゲセゼテデネヘベペメレェ";
    const O: &str = "おこごそぞとどのほぼぽもよろをょぉオコゴソゾトドノホボポモヨロヲョ";
    if A.contains(c) {
        Some('a')
    } else if I.contains(c) {
        Some('i')
    } else if U.contains(c) {
        Some('u')
    } else if E.contains(c) {
        Some('e')
    } else if O.contains(c) {
        Some('o')
    } else if c == 'ん' || c == 'ン' {
        Some('n')
    } else {
        None
    }
}

/// The vowel a lyric ends on, skipping the long-vowel mark
pub(crate) fn lyric_vowel(lyric: &str) -> Option<char> {
    lyric.chars().rev().find_map(kana_vowel)
}

/// Replace every lyric with the rest lyric
pub struct LyricToRest;

impl BatchTransform for LyricToRest {
    fn summary(&self) -> String {
        "convert lyrics to rests".to_string()
    }

    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError> {
        let mut out: Vec<Note> = notes
            .iter()
            .map(|note| {
                let mut n = note.clone();
                n.lyric = Some(REST_LYRIC.to_string());
                n
            })
            .collect();
        timing::autofit_score(&mut out)?;
        Ok(out)
    }
}

/// Which side of the lyric to strip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affix {
    Prefix,
    Suffix,
}

/// Strip non-kana prefixes or suffixes (voice-color tags, pitch suffixes)
/// from every kana lyric; lyrics without kana are left alone
pub struct StripAffix {
    pub affix: Affix,
}

impl BatchTransform for StripAffix {
    fn summary(&self) -> String {
        match self.affix {
            Affix::Prefix => "strip lyric prefixes".to_string(),
            Affix::Suffix => "strip lyric suffixes".to_string(),
        }
    }

    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError> {
        let pattern: &Regex = match self.affix {
            Affix::Prefix => &LEADING_NON_KANA,
            Affix::Suffix => &TRAILING_NON_KANA,
        };
        let mut out: Vec<Note> = notes
            .iter()
            .map(|note| {
                let mut n = note.clone();
                if let Some(lyric) = &note.lyric {
                    if !note.is_rest() && KANA.is_match(lyric) {
                        let stripped = pattern.replace(lyric, "");
                        if !stripped.is_empty() {
                            n.lyric = Some(stripped.into_owned());
                        }
                    }
                }
                n
            })
            .collect();
        timing::autofit_score(&mut out)?;
        Ok(out)
    }
}

/// Distribute a lyric line across the notes in order
///
/// Kana text is split into morae, Latin text on whitespace; the shorter of
/// syllable count and note count is assigned, remaining notes keep their
/// lyrics.
pub struct DistributeLyrics {
    pub text: String,
}

impl BatchTransform for DistributeLyrics {
    fn summary(&self) -> String {
        "distribute lyrics".to_string()
    }

    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError> {
        let syllables = split_syllables(&self.text);
        let mut out: Vec<Note> = notes.to_vec();
        for (note, syllable) in out.iter_mut().zip(syllables) {
            note.lyric = Some(syllable);
        }
        timing::autofit_score(&mut out)?;
        Ok(out)
    }
}
