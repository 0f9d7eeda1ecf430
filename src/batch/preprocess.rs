//! Score preprocessing: one configurable pass over the whole score
//!
//! Combines lyric phonemizing (CV/VCV aliasing), threshold-driven vibrato
//! assignment, portamento timing/speed overrides, and flat parameter
//! overwrites. Rest notes pass through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ScoreError;
use crate::models::note::Note;
use crate::models::pitchbend::PitchBendStart;
use crate::models::score;
use crate::models::vibrato::Vibrato;
use crate::timing;

use super::lyric::lyric_vowel;
use super::BatchTransform;

/// VCV alias prefix: a vowel class, `-`, `*`, or `n`, followed by a space
static VCV_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-aiueon*]+\s+").unwrap());

/// Pure-vowel kana eligible for vowel connection
const VOWEL_KANA: &str = "あいうえおんアイウエオン";

/// Target lyric aliasing style
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LyricStyle {
    /// Bare CV lyrics: any VCV prefix is stripped
    Cv,
    /// VCV lyrics: `<previous vowel> <kana>`, `-` at phrase starts
    Vcv,
}

/// One vibrato assignment rule: notes at least `min_ms` long get `preset`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VibratoRule {
    pub min_ms: f64,
    pub preset: Vibrato,
}

impl VibratoRule {
    fn matches(&self, ms_length: f64) -> bool {
        ms_length >= self.min_ms
    }
}

/// Options for the preprocessing pass; `None` leaves the concern untouched
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreprocessOptions {
    pub lyric_style: Option<LyricStyle>,
    /// In VCV style, alias pure-vowel continuations as `* <kana>`
    pub vowel_connection: bool,

    /// Rule for the last note of a phrase (before a rest or at score end);
    /// takes priority over the other two
    pub phrase_end_vibrato: Option<VibratoRule>,
    /// Rule for long notes; takes priority over the default rule
    pub long_note_vibrato: Option<VibratoRule>,
    pub default_vibrato: Option<VibratoRule>,

    /// Portamento start, ms before the note onset
    pub pitch_start_ms: Option<f64>,
    /// Total portamento duration; existing segment ratios are preserved
    pub pitch_speed_ms: Option<f64>,

    pub intensity: Option<i32>,
    pub velocity: Option<i32>,
    pub modulation: Option<i32>,
    pub flags: Option<String>,
}

pub struct Preprocess {
    pub options: PreprocessOptions,
}

impl Preprocess {
    /// The lyric with any VCV prefix removed
    fn core_lyric(lyric: &str) -> String {
        VCV_PREFIX.replace(lyric, "").into_owned()
    }

    fn rewrite_lyric(&self, notes: &[Note], index: usize, out: &mut Note) {
        let Some(style) = self.options.lyric_style else {
            return;
        };
        let Some(lyric) = out.lyric.clone() else {
            return;
        };
        let core = Self::core_lyric(&lyric);
        match style {
            LyricStyle::Cv => out.lyric = Some(core),
            LyricStyle::Vcv => {
                let prev_vowel = score::prev_sung(notes, index)
                    .and_then(|p| p.lyric.as_deref().map(Self::core_lyric))
                    .and_then(|c| lyric_vowel(&c));
                let prefix = match prev_vowel {
                    Some(v) => {
                        let connects = self.options.vowel_connection
                            && core.chars().count() == 1
                            && core.chars().all(|c| VOWEL_KANA.contains(c))
                            && lyric_vowel(&core) == Some(v);
                        if connects {
                            "*".to_string()
                        } else {
                            v.to_string()
                        }
                    }
                    None => "-".to_string(),
                };
                out.lyric = Some(format!("{} {}", prefix, core));
            }
        }
    }

    fn assign_vibrato(&self, notes: &[Note], index: usize, out: &mut Note) -> Result<(), ScoreError> {
        let opts = &self.options;
        if opts.phrase_end_vibrato.is_none()
            && opts.long_note_vibrato.is_none()
            && opts.default_vibrato.is_none()
        {
            return Ok(());
        }
        let ms_length = notes[index].ms_length()?;
        let at_phrase_end = score::next_sung(notes, index).is_none();

        let rule = opts
            .phrase_end_vibrato
            .filter(|r| at_phrase_end && r.matches(ms_length))
            .or_else(|| opts.long_note_vibrato.filter(|r| r.matches(ms_length)))
            .or_else(|| opts.default_vibrato.filter(|r| r.matches(ms_length)));
        if let Some(rule) = rule {
            out.vibrato = Some(rule.preset);
        }
        Ok(())
    }

    fn override_pitch(&self, out: &mut Note) {
        if let Some(start) = self.options.pitch_start_ms {
            let height = out.pbs().map(|p| p.height()).unwrap_or(0.0);
            out.set_pbs(PitchBendStart::new(-start.abs(), height));
        }
        if let Some(speed) = self.options.pitch_speed_ms {
            if let Some(pbw) = out.pbw() {
                let sum: f64 = pbw.iter().sum();
                if sum > 0.0 {
                    let factor = speed / sum;
                    out.set_pbw(pbw.iter().map(|w| w * factor).collect());
                }
            }
        }
    }

    fn overwrite_flat(&self, out: &mut Note) {
        if let Some(intensity) = self.options.intensity {
            out.set_intensity(intensity);
        }
        if let Some(velocity) = self.options.velocity {
            out.set_velocity(velocity);
        }
        if let Some(modulation) = self.options.modulation {
            out.set_modulation(modulation);
        }
        if let Some(flags) = &self.options.flags {
            out.flags = Some(flags.clone());
        }
    }
}

impl BatchTransform for Preprocess {
    fn summary(&self) -> String {
        "preprocess score".to_string()
    }

    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError> {
        let mut out: Vec<Note> = Vec::with_capacity(notes.len());
        for (index, note) in notes.iter().enumerate() {
            let mut n = note.clone();
            if note.is_sung() {
                self.rewrite_lyric(notes, index, &mut n);
                self.assign_vibrato(notes, index, &mut n)?;
                self.override_pitch(&mut n);
                self.overwrite_flat(&mut n);
            }
            out.push(n);
        }
        timing::autofit_score(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sung(lyric: &str, length: i32) -> Note {
        let mut n = Note::new();
        n.lyric = Some(lyric.to_string());
        n.set_length(length);
        n.set_tempo(120.0);
        n
    }

    fn preset(depth: f64) -> Vibrato {
        Vibrato::new(65.0, 180.0, depth, 20.0, 20.0, 0.0, 0.0)
    }

    fn with_options(options: PreprocessOptions) -> Preprocess {
        Preprocess { options }
    }

    #[test]
    fn vcv_aliases_follow_the_previous_vowel() {
        let mut notes = vec![sung("か", 480), sung("き", 480), sung("R", 480), sung("さ", 480)];
        score::relink(&mut notes);
        let p = with_options(PreprocessOptions {
            lyric_style: Some(LyricStyle::Vcv),
            ..Default::default()
        });
        let out = p.transform(&notes).unwrap();
        assert_eq!(out[0].lyric.as_deref(), Some("- か"));
        assert_eq!(out[1].lyric.as_deref(), Some("a き"));
        assert_eq!(out[2].lyric.as_deref(), Some("R"));
        assert_eq!(out[3].lyric.as_deref(), Some("- さ")); // phrase restart after rest
    }

    #[test]
    fn vowel_connection_uses_the_star_alias() {
        let mut notes = vec![sung("か", 480), sung("あ", 480)];
        score::relink(&mut notes);
        let p = with_options(PreprocessOptions {
            lyric_style: Some(LyricStyle::Vcv),
            vowel_connection: true,
            ..Default::default()
        });
        let out = p.transform(&notes).unwrap();
        assert_eq!(out[1].lyric.as_deref(), Some("* あ"));
    }

    #[test]
    fn cv_strips_existing_vcv_prefixes() {
        let mut notes = vec![sung("- か", 480), sung("a き", 480)];
        score::relink(&mut notes);
        let p = with_options(PreprocessOptions {
            lyric_style: Some(LyricStyle::Cv),
            ..Default::default()
        });
        let out = p.transform(&notes).unwrap();
        assert_eq!(out[0].lyric.as_deref(), Some("か"));
        assert_eq!(out[1].lyric.as_deref(), Some("き"));
    }

    #[test]
    fn vibrato_rules_apply_by_priority() {
        // 480 ticks at 120 BPM = 500 ms; 960 = 1000 ms
        let mut notes = vec![sung("か", 960), sung("き", 480), sung("さ", 960)];
        score::relink(&mut notes);
        let p = with_options(PreprocessOptions {
            phrase_end_vibrato: Some(VibratoRule {
                min_ms: 400.0,
                preset: preset(100.0),
            }),
            long_note_vibrato: Some(VibratoRule {
                min_ms: 800.0,
                preset: preset(60.0),
            }),
            default_vibrato: Some(VibratoRule {
                min_ms: 450.0,
                preset: preset(30.0),
            }),
            ..Default::default()
        });
        let out = p.transform(&notes).unwrap();
        // long note mid-phrase: long rule beats default
        assert_eq!(out[0].vibrato.unwrap().depth(), 60.0);
        // short-ish note mid-phrase: default rule
        assert_eq!(out[1].vibrato.unwrap().depth(), 30.0);
        // last note of the score: phrase-end rule wins
        assert_eq!(out[2].vibrato.unwrap().depth(), 100.0);
    }

    #[test]
    fn vibrato_below_every_threshold_is_left_alone() {
        let mut notes = vec![sung("か", 120)]; // 125 ms
        score::relink(&mut notes);
        let p = with_options(PreprocessOptions {
            default_vibrato: Some(VibratoRule {
                min_ms: 450.0,
                preset: preset(30.0),
            }),
            ..Default::default()
        });
        let out = p.transform(&notes).unwrap();
        assert!(out[0].vibrato.is_none());
    }

    #[test]
    fn pitch_overrides_rescale_the_curve() {
        let mut note = sung("か", 480);
        note.set_pbw(vec![30.0, 90.0]);
        note.set_pby(vec![-20.0]);
        note.set_pbm(vec![Default::default(); 2]);
        let mut notes = vec![note];
        score::relink(&mut notes);
        let p = with_options(PreprocessOptions {
            pitch_start_ms: Some(50.0),
            pitch_speed_ms: Some(60.0),
            ..Default::default()
        });
        let out = p.transform(&notes).unwrap();
        assert_eq!(out[0].pbs().unwrap().time, -50.0);
        assert_eq!(out[0].pbw().unwrap(), &[15.0, 45.0]); // ratios preserved
    }

    #[test]
    fn flat_overwrites_are_clamped() {
        let mut notes = vec![sung("か", 480)];
        score::relink(&mut notes);
        let p = with_options(PreprocessOptions {
            intensity: Some(300),
            velocity: Some(150),
            modulation: Some(-999),
            flags: Some("g-3".to_string()),
            ..Default::default()
        });
        let out = p.transform(&notes).unwrap();
        assert_eq!(out[0].intensity(), Some(200));
        assert_eq!(out[0].velocity(), Some(150));
        assert_eq!(out[0].modulation(), Some(-200));
        assert_eq!(out[0].flags.as_deref(), Some("g-3"));
    }
}
