use std::collections::{BTreeSet, HashSet};

/// Transformation that can be applied to a title
pub trait TitleTransformation: Send + Sync {
    fn transform(&self, title: &str) -> String;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct LowercaseTransform;

impl TitleTransformation for LowercaseTransform {
    fn transform(&self, title: &str) -> String {
        title.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "Lowercase"
    }
}

/// Folds the long-vowel marks used in romanized Japanese ("Nōto" -> "Noto")
#[derive(Debug, Clone)]
pub struct FoldLongVowelsTransform;

impl TitleTransformation for FoldLongVowelsTransform {
    fn transform(&self, title: &str) -> String {
        title
            .chars()
            .map(|c| match c {
                'ā' | 'â' | 'à' | 'á' | 'ä' => 'a',
                'ē' | 'ê' | 'è' | 'é' | 'ë' => 'e',
                'ī' | 'î' | 'ì' | 'í' | 'ï' => 'i',
                'ō' | 'ô' | 'ò' | 'ó' | 'ö' => 'o',
                'ū' | 'û' | 'ù' | 'ú' | 'ü' => 'u',
                'Ā' | 'Â' | 'À' | 'Á' | 'Ä' => 'A',
                'Ē' | 'Ê' | 'È' | 'É' | 'Ë' => 'E',
                'Ī' | 'Î' | 'Ì' | 'Í' | 'Ï' => 'I',
                'Ō' | 'Ô' | 'Ò' | 'Ó' | 'Ö' => 'O',
                'Ū' | 'Û' | 'Ù' | 'Ú' | 'Ü' => 'U',
                other => other,
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "FoldLongVowels"
    }
}

/// Replaces everything that is neither alphanumeric nor whitespace with a space.
///
/// Replacing instead of dropping keeps "Re:Zero" as two words.
#[derive(Debug, Clone)]
pub struct ReplaceSpecialCharsTransform;

impl TitleTransformation for ReplaceSpecialCharsTransform {
    fn transform(&self, title: &str) -> String {
        title
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "ReplaceSpecialChars"
    }
}

/// Collapses runs of whitespace and trims
#[derive(Debug, Clone)]
pub struct NormalizeWhitespaceTransform;

impl TitleTransformation for NormalizeWhitespaceTransform {
    fn transform(&self, title: &str) -> String {
        title.split_whitespace().collect::<Vec<&str>>().join(" ")
    }

    fn name(&self) -> &'static str {
        "NormalizeWhitespace"
    }
}

/// Title normalizer that applies a pipeline of transformations
pub struct TitleNormalizer {
    transformations: Vec<Box<dyn TitleTransformation>>,
}

impl TitleNormalizer {
    pub fn new() -> Self {
        Self {
            transformations: Vec::new(),
        }
    }

    /// Pipeline used for matching.
    ///
    /// Season numbers and sequel markers survive on purpose: "Season 2" must not
    /// look like "Season 1".
    pub fn matching_pipeline() -> Self {
        Self::new()
            .with_lowercase()
            .with_fold_long_vowels()
            .with_replace_special_chars()
            .with_normalize_whitespace()
    }

    pub fn with_lowercase(mut self) -> Self {
        self.transformations.push(Box::new(LowercaseTransform));
        self
    }

    pub fn with_fold_long_vowels(mut self) -> Self {
        self.transformations.push(Box::new(FoldLongVowelsTransform));
        self
    }

    pub fn with_replace_special_chars(mut self) -> Self {
        self.transformations
            .push(Box::new(ReplaceSpecialCharsTransform));
        self
    }

    pub fn with_normalize_whitespace(mut self) -> Self {
        self.transformations
            .push(Box::new(NormalizeWhitespaceTransform));
        self
    }

    pub fn normalize(&self, title: &str) -> String {
        let mut result = title.to_string();

        for transformation in &self.transformations {
            result = transformation.transform(&result);
            log::trace!("After {}: '{}'", transformation.name(), result);
        }

        result
    }

    pub fn transformation_count(&self) -> usize {
        self.transformations.len()
    }
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        Self::matching_pipeline()
    }
}

/// Splits normalized titles into index tokens
#[derive(Debug, Clone)]
pub struct TitleTokenizer {
    stop_words: HashSet<String>,
    min_token_length: usize,
}

impl TitleTokenizer {
    pub fn new(stop_words: Vec<String>, min_token_length: usize) -> Self {
        Self {
            stop_words: stop_words.into_iter().map(|w| w.to_lowercase()).collect(),
            min_token_length,
        }
    }

    /// Tokens of an already normalized title.
    ///
    /// If every word is a stop word or too short, the whole title is the only token,
    /// so titles like "A" or "No" stay findable.
    pub fn tokenize(&self, normalized: &str) -> BTreeSet<String> {
        let tokens: BTreeSet<String> = normalized
            .split_whitespace()
            .filter(|word| {
                !self.stop_words.contains(*word) && word.chars().count() >= self.min_token_length
            })
            .map(str::to_string)
            .collect();

        if tokens.is_empty() && !normalized.trim().is_empty() {
            return BTreeSet::from([normalized.trim().to_string()]);
        }
        tokens
    }
}
