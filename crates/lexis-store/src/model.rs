//! Record types: synsets, senses and morphological exceptions.
//!
//! Every type has a fixed serde schema. Unknown fields are ignored and missing
//! required fields fail the decode. Constraints that serde cannot express are
//! checked by the `validate` methods, which the decoder always calls before a
//! record is published.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DecodeError, LexisError};

// ============================================================================
// Identifiers and categories
// ============================================================================

/// Synset identifier: an 8-digit byte offset into the WordNet data files.
///
/// Stored as a `u32` and rendered zero-padded, so `"00001740"` and `SynsetId(1740)`
/// are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SynsetId(u32);

impl SynsetId {
    pub const WIDTH: usize = 8;

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl FromStr for SynsetId {
    type Err = LexisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LexisError::InvalidId(s.to_string()));
        }
        s.parse::<u32>()
            .map(SynsetId)
            .map_err(|_| LexisError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

impl Serialize for SynsetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SynsetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Syntactic category (WordNet `ss_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "n")]
    Noun,
    #[serde(rename = "v")]
    Verb,
    #[serde(rename = "a")]
    Adjective,
    #[serde(rename = "r")]
    Adverb,
    #[serde(rename = "s")]
    AdjectiveSatellite,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Noun,
        Category::Verb,
        Category::Adjective,
        Category::Adverb,
        Category::AdjectiveSatellite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Noun => "n",
            Category::Verb => "v",
            Category::Adjective => "a",
            Category::Adverb => "r",
            Category::AdjectiveSatellite => "s",
        }
    }

    /// Dense index in `0..5`, used for per-category arrays.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Category {
    type Err = LexisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Category::Noun),
            "v" => Ok(Category::Verb),
            "a" => Ok(Category::Adjective),
            "r" => Ok(Category::Adverb),
            "s" => Ok(Category::AdjectiveSatellite),
            other => Err(LexisError::InvalidCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Pointer vocabulary
// ============================================================================

/// WordNet pointer symbols. Any other symbol fails the record decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerSymbol {
    #[serde(rename = "!")]
    Antonym,
    #[serde(rename = "@")]
    Hypernym,
    #[serde(rename = "@i")]
    InstanceHypernym,
    #[serde(rename = "~")]
    Hyponym,
    #[serde(rename = "~i")]
    InstanceHyponym,
    #[serde(rename = "#m")]
    MemberHolonym,
    #[serde(rename = "#s")]
    SubstanceHolonym,
    #[serde(rename = "#p")]
    PartHolonym,
    #[serde(rename = "%m")]
    MemberMeronym,
    #[serde(rename = "%s")]
    SubstanceMeronym,
    #[serde(rename = "%p")]
    PartMeronym,
    #[serde(rename = "=")]
    Attribute,
    #[serde(rename = "+")]
    DerivationallyRelated,
    #[serde(rename = ";c")]
    DomainTopic,
    #[serde(rename = "-c")]
    MemberOfDomainTopic,
    #[serde(rename = ";r")]
    DomainRegion,
    #[serde(rename = "-r")]
    MemberOfDomainRegion,
    #[serde(rename = ";u")]
    DomainUsage,
    #[serde(rename = "-u")]
    MemberOfDomainUsage,
    #[serde(rename = "*")]
    Entailment,
    #[serde(rename = ">")]
    Cause,
    #[serde(rename = "^")]
    AlsoSee,
    #[serde(rename = "$")]
    VerbGroup,
    #[serde(rename = "&")]
    SimilarTo,
    #[serde(rename = "<")]
    ParticipleOfVerb,
    #[serde(rename = "\\")]
    Pertainym,
}

impl PointerSymbol {
    /// The symbol as written in the data files.
    pub fn as_str(self) -> &'static str {
        use PointerSymbol::*;
        match self {
            Antonym => "!",
            Hypernym => "@",
            InstanceHypernym => "@i",
            Hyponym => "~",
            InstanceHyponym => "~i",
            MemberHolonym => "#m",
            SubstanceHolonym => "#s",
            PartHolonym => "#p",
            MemberMeronym => "%m",
            SubstanceMeronym => "%s",
            PartMeronym => "%p",
            Attribute => "=",
            DerivationallyRelated => "+",
            DomainTopic => ";c",
            MemberOfDomainTopic => "-c",
            DomainRegion => ";r",
            MemberOfDomainRegion => "-r",
            DomainUsage => ";u",
            MemberOfDomainUsage => "-u",
            Entailment => "*",
            Cause => ">",
            AlsoSee => "^",
            VerbGroup => "$",
            SimilarTo => "&",
            ParticipleOfVerb => "<",
            Pertainym => "\\",
        }
    }
}

impl fmt::Display for PointerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Synset
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub lemma: String,
    pub lex_id: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sense_number: Option<u32>,
    /// Adjective position marker (`a`, `p`, `ip`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// A directional edge to another synset. `source`/`target` are 1-based word
/// indices; 0 means the pointer applies to the whole synset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    pub symbol: PointerSymbol,
    pub offset: SynsetId,
    pub pos: Category,
    pub source: u16,
    pub target: u16,
}

impl Pointer {
    pub fn is_semantic(&self) -> bool {
        self.source == 0 && self.target == 0
    }
}

/// Verb frame attached to a synset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub frame_number: u8,
    #[serde(default)]
    pub word_indices: Vec<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    pub offset: SynsetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lex_filenum: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lex_filename: Option<String>,
    pub ss_type: Category,
    pub words: Vec<Word>,
    pub pointers: Vec<Pointer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Frame>,
    pub gloss: String,
}

impl Synset {
    pub const MAX_LEX_ID: u8 = 15;
    pub const MAX_LEX_FILENUM: u8 = 44;
    pub const MAX_FRAME_NUMBER: u8 = 35;

    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.words.is_empty() {
            return Err(DecodeError::EmptyWords);
        }
        for (index, word) in self.words.iter().enumerate() {
            if word.lemma.trim().is_empty() {
                return Err(DecodeError::EmptyLemma { index });
            }
            if word.lex_id > Self::MAX_LEX_ID {
                return Err(DecodeError::LexIdOutOfRange(word.lex_id));
            }
            if word.sense_number == Some(0) {
                return Err(DecodeError::InvalidSenseNumber);
            }
        }
        if let Some(filenum) = self.lex_filenum {
            if filenum > Self::MAX_LEX_FILENUM {
                return Err(DecodeError::LexFileOutOfRange(filenum));
            }
        }
        for frame in &self.frames {
            if frame.frame_number == 0 || frame.frame_number > Self::MAX_FRAME_NUMBER {
                return Err(DecodeError::InvalidFrameNumber(frame.frame_number));
            }
        }
        Ok(())
    }

    pub fn lemma_names(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.lemma.as_str())
    }
}

// ============================================================================
// Senses and exceptions
// ============================================================================

/// One line of `index.sense`: a lemma's meaning, ranked within lemma + category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub sense_key: String,
    pub lemma: String,
    pub ss_type: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lex_filenum: Option<u8>,
    pub lex_id: u8,
    pub synset_offset: SynsetId,
    pub sense_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_count: Option<u32>,
}

impl Sense {
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.sense_key.is_empty() || !self.sense_key.contains('%') {
            return Err(DecodeError::InvalidSenseKey(self.sense_key.clone()));
        }
        if self.lemma.trim().is_empty() {
            return Err(DecodeError::EmptyLemma { index: 0 });
        }
        if self.lex_id > Synset::MAX_LEX_ID {
            return Err(DecodeError::LexIdOutOfRange(self.lex_id));
        }
        if self.sense_number == 0 {
            return Err(DecodeError::InvalidSenseNumber);
        }
        Ok(())
    }
}

/// Irregular inflection, e.g. `geese -> [goose]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionEntry {
    pub inflected_form: String,
    pub base_forms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
}

impl ExceptionEntry {
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.inflected_form.trim().is_empty() {
            return Err(DecodeError::EmptyInflectedForm);
        }
        if self.base_forms.is_empty() {
            return Err(DecodeError::EmptyBaseForms(self.inflected_form.clone()));
        }
        Ok(())
    }

    /// The entry's category, if `pos` names one of the closed set.
    pub fn category(&self) -> Option<Category> {
        self.pos.as_deref().and_then(|p| p.parse().ok())
    }
}
