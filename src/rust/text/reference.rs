use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;

/// Punctuation marks that attach to the preceding token when rendering display text.
pub const PUNCTUATION: [&str; 7] = [".", ",", ":", ";", "?", "!", "…"];

const VOWELS: &str = concat!(
    "aeiouyAEIOUY",
    "ăâêôơưĂÂÊÔƠƯ",
    "áàảãạÁÀẢÃẠ",
    "ắằẳẵặẮẰẲẴẶ",
    "ấầẩẫậẤẦẨẪẬ",
    "éèẻẽẹÉÈẺẼẸ",
    "óòỏõọÓÒỎÕỌ",
    "ốồổỗộỐỒỔỖỘ",
    "ớờởỡợỚỜỞỠỢ",
    "íìỉĩịÍÌỈĨỊ",
    "úùủũụÚÙỦŨỤ",
    "ýỳỷỹỵÝỲỶỸỴ",
    "đĐ",
);

const STOPWORDS: &[&str] = &[
    "là", "và", "của", "không", "rất", "này", "kia", "đó", "tôi", "ban", "bạn", "mình", "anh",
    "em", "chỉ", "thì", "nhưng", "nếu", "vì", "nên", "cho", "khi", "đã", "đang", "sẽ", "ở",
    "trong", "trên", "với", "hay", "cũng", "rồi", "luôn",
];

const NORMALIZATION: &[(&str, &str)] = &[
    // abbreviations
    ("khong", "không"),
    ("k", "không"),
    ("ko", "không"),
    ("k0", "không"),
    ("hok", "không"),
    ("khg", "không"),
    ("hk", "không"),
    ("kh", "không"),
    // questions
    ("gi", "gì"),
    ("j", "gì"),
    ("sao", "sao"),
    ("dc", "được"),
    // pronouns
    ("toi", "tôi"),
    ("ban", "bạn"),
    ("minh", "mình"),
    ("anh", "anh"),
    ("chi", "chị"),
    ("em", "em"),
    ("co", "cô"),
    ("chu", "chú"),
    ("ba", "bà"),
    ("ong", "ông"),
    ("nguoi", "người"),
    ("ho", "họ"),
    // emotion verbs and adjectives
    ("yeu", "yêu"),
    ("thuong", "thương"),
    ("ghet", "ghét"),
    ("thich", "thích"),
    ("biet", "biết"),
    ("hieu", "hiểu"),
    ("thay", "thấy"),
    ("khoe", "khỏe"),
    ("om", "ốm"),
    ("dau", "đau"),
    ("met", "mệt"),
    ("vui", "vui"),
    ("buon", "buồn"),
    ("gian", "giận"),
    ("nong", "nóng"),
    ("lanh", "lạnh"),
    ("dep", "đẹp"),
    ("xau", "xấu"),
    // adverbs
    ("rat", "rất"),
    ("hon", "hơn"),
    ("lam", "lắm"),
    ("qua", "quá"),
    ("nhieu", "nhiều"),
    ("it", "ít"),
    // place and time
    ("nay", "nay"),
    ("mai", "mai"),
    ("hom", "hôm"),
    ("truoc", "trước"),
    ("sau", "sau"),
    ("o", "ở"),
    // connectives
    ("va", "và"),
    ("voi", "với"),
    ("vi", "vì"),
    ("nen", "nên"),
    ("nhung", "nhưng"),
    // common words
    ("duoc", "được"),
    ("du", "đủ"),
    ("thoi", "thôi"),
    ("roi", "rồi"),
    ("cung", "cũng"),
    ("luon", "luôn"),
    ("neu", "nếu"),
    ("dang", "đang"),
    ("se", "sẽ"),
    ("da", "đã"),
    // nouns
    ("con", "con"),
    ("nguoi", "người"),
    ("ban be", "bạn bè"),
    ("gia dinh", "gia đình"),
    ("cong viec", "công việc"),
    ("truong", "trường"),
    ("lop", "lớp"),
    ("mon", "món"),
    ("an", "ăn"),
    ("quan", "quán"),
    ("nha", "nhà"),
    ("cua", "của"),
    // judgements
    ("te", "tệ"),
    ("tot", "tốt"),
    ("hay", "hay"),
    ("do", "dở"),
    ("chap nhan", "chấp nhận"),
    ("tuyet", "tuyệt"),
    ("kha", "khá"),
    ("de", "dễ"),
    ("kho", "khó"),
    ("to", "to"),
    ("nho", "nhỏ"),
    ("lon", "lớn"),
    ("nhe", "nhẹ"),
    ("man", "mặn"),
    ("ngot", "ngọt"),
];

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("Failed to read reference data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid reference data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Mapping from informal, abbreviated or undiacritized tokens to their canonical form.
///
/// Iteration follows insertion order. Inserting an existing key replaces its value
/// without moving it.
#[derive(Debug, Clone, Default)]
pub struct NormalizationDictionary {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl NormalizationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into().to_lowercase();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(&key.to_lowercase())
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NormalizationDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for (key, value) in iter {
            dictionary.insert(key, value);
        }
        dictionary
    }
}

/// Immutable lexical tables shared by the validity checker and both normalizers.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    vowels: HashSet<char>,
    stopwords: HashSet<String>,
    dictionary: NormalizationDictionary,
}

#[derive(Deserialize)]
struct ReferenceFile {
    vowels: String,
    stopwords: Vec<String>,
    normalization: Vec<(String, String)>,
}

impl ReferenceData {
    /// Tables for Vietnamese shipped with the crate.
    pub fn builtin() -> Self {
        Self::new(
            VOWELS.chars(),
            STOPWORDS.iter().copied(),
            NORMALIZATION.iter().copied().collect(),
        )
    }

    pub fn new<S: Into<String>>(
        vowels: impl IntoIterator<Item = char>,
        stopwords: impl IntoIterator<Item = S>,
        dictionary: NormalizationDictionary,
    ) -> Self {
        Self {
            vowels: vowels.into_iter().collect(),
            stopwords: stopwords.into_iter().map(|w| w.into().to_lowercase()).collect(),
            dictionary,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ReferenceError> {
        let file: ReferenceFile = serde_json::from_str(json)?;
        Ok(Self::new(
            file.vowels.chars(),
            file.stopwords,
            file.normalization.into_iter().collect(),
        ))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        info!("Loading reference data from {:?}", path);
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn is_vowel(&self, ch: char) -> bool {
        self.vowels.contains(&ch)
    }

    /// Expects an already lowercased word.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn is_punctuation(&self, token: &str) -> bool {
        PUNCTUATION.contains(&token)
    }

    pub fn dictionary(&self) -> &NormalizationDictionary {
        &self.dictionary
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}
