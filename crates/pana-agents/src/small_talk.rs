use once_cell::sync::Lazy;
use rand::seq::IndexedRandom;
use regex::Regex;

const MAX_SMALL_TALK_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmallTalkCategory {
    Greeting,
    Wellbeing,
    Casual,
}

impl SmallTalkCategory {
    pub fn replies(&self) -> &'static [&'static str] {
        match self {
            SmallTalkCategory::Greeting => &[
                "Hi there! 👋",
                "Hello! Ready when you are.",
                "Hey! What should we dive into?",
            ],
            SmallTalkCategory::Wellbeing => &[
                "I'm doing well, thanks! How can I help you?",
                "Feeling great and ready to jump in whenever you are.",
                "All good here! What can I walk you through?",
            ],
            SmallTalkCategory::Casual => &[
                "All set on my end. What's next?",
                "Still here and ready. What can I help with?",
                "Everything's running smoothly. Need anything?",
            ],
        }
    }

    /// A random reply from this category's pool
    pub fn pick_reply(&self) -> &'static str {
        self.replies()
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or("Hello!")
    }
}

/// Ordered (pattern, category) table; first match wins
const PATTERNS: &[(&str, SmallTalkCategory)] = &[
    (r"^hi( there)?$", SmallTalkCategory::Greeting),
    (r"^hello( there)?$", SmallTalkCategory::Greeting),
    (r"^hey( there| team)?$", SmallTalkCategory::Greeting),
    (r"^howdy$", SmallTalkCategory::Greeting),
    (r"^hiya$", SmallTalkCategory::Greeting),
    (r"^heya$", SmallTalkCategory::Greeting),
    (r"^yo$", SmallTalkCategory::Greeting),
    (r"^sup$", SmallTalkCategory::Casual),
    (r"^what'?s up$", SmallTalkCategory::Casual),
    (r"^good (morning|afternoon|evening)$", SmallTalkCategory::Greeting),
    (r"^morning$", SmallTalkCategory::Greeting),
    (r"^afternoon$", SmallTalkCategory::Greeting),
    (r"^evening$", SmallTalkCategory::Greeting),
    (r"^how are you$", SmallTalkCategory::Wellbeing),
    (r"^how are you doing$", SmallTalkCategory::Wellbeing),
    (r"^how'?s it going$", SmallTalkCategory::Wellbeing),
    (r"^how are things$", SmallTalkCategory::Wellbeing),
    (r"^how is everything$", SmallTalkCategory::Wellbeing),
    (r"^how do you do$", SmallTalkCategory::Wellbeing),
];

static TABLE: Lazy<Vec<(Regex, SmallTalkCategory)>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .filter_map(|(pattern, category)| Regex::new(pattern).ok().map(|re| (re, *category)))
        .collect()
});

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://").expect("static regex"));
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z\s']").expect("static regex"));
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Lowercased, punctuation-free form of a short message, if it qualifies
fn normalize(message: &str) -> Option<String> {
    let lowered = message.trim().to_lowercase();
    if lowered.is_empty() || lowered.chars().count() > MAX_SMALL_TALK_CHARS {
        return None;
    }
    if URL.is_match(&lowered) {
        return None;
    }

    let cleaned = NON_WORD.replace_all(&lowered, " ");
    let collapsed = SPACES.replace_all(&cleaned, " ").trim().to_string();
    (!collapsed.is_empty()).then_some(collapsed)
}

pub fn detect_small_talk(message: &str) -> Option<SmallTalkCategory> {
    let normalized = normalize(message)?;
    TABLE
        .iter()
        .find(|(re, _)| re.is_match(&normalized))
        .map(|(_, category)| *category)
}
