use regex::Regex;

/// Ordered substitution table applied token by token. First match wins, so
/// exact spellings must come before their wildcard variants. Patterns are
/// case-insensitive globs: `*` captures and the captured text is kept
/// around the replacement (possessives and punctuation survive).
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("kill", "unalive"),
    ("idk", "I don't know"),
    ("omg", "oh my god"),
    ("brb", "be right back"),
    ("gtg", "got to go"),
    ("g2g", "got to go"),
    ("ttyl", "talk to you later"),
    ("btw", "by the way"),
    ("imo", "in my opinion"),
    ("oml", "oh my lord"),
    ("omd", "oh my days"),
    ("imho", "in my humble opinion"),
    ("mb", "my bad"),
    ("fyi", "for your information"),
    ("tbh", "to be honest"),
    ("srs", "serious"),
    ("srsly", "seriously"),
    ("smh", "shaking my head"),
    ("gib", "give"),
    ("js", "just"),
    ("ikr", "I know right"),
    ("ik", "I know"),
    ("idek", "I don't even know"),
    ("np", "no problem"),
    ("ty", "thank you"),
    ("thx", "thanks"),
    ("yw", "you're welcome"),
    ("afaik", "as far as I know"),
    ("asap", "as soon as possible"),
    ("bbl", "be back later"),
    ("bfn", "bye for now"),
    ("bff", "best friends forever"),
    ("dm", "direct message"),
    ("hmu", "hit me up"),
    ("jk", "just kidding"),
    ("lmk", "let me know"),
    ("nvm", "never mind"),
    ("rn", "right now"),
    ("wbu", "what about you"),
    ("wyd", "what are you doing"),
    ("wym", "what do you mean"),
    ("omw", "on my way"),
    ("pov", "point of view"),
    ("rofl", "rolling on the floor laughing"),
    ("stfu", "shut the frick up"),
    ("icl", "I can't lie"),
    ("pmo", "pisses me off"),
    ("sus", "suspicious"),
    ("tmi", "too much information"),
    ("wth", "what the heck"),
    ("wtf", "what the frick"),
    ("xd", "laughing"),
    ("xoxo", "hugs and kisses"),
    ("irl", "in real life"),
    ("fml", "frick my life"),
    ("faq", "frequently asked questions"),
    ("gg", "good game"),
    ("ggwp", "good game well played"),
    ("glhf", "good luck, have fun"),
    ("wp", "well played"),
    ("afk", "away from keyboard"),
    ("b/c", "because"),
    ("bc", "because"),
    ("gr8", "great"),
    ("mfw", "my face when"),
    ("tfw", "that feeling when"),
    ("icymi", "in case you missed it"),
    ("tl;dr", "too long didn't read"),
    ("tldr", "too long didn't read"),
    ("idgaf", "I don't give a frick"),
    ("ts", "this stuff"),
    ("b4", "before"),
    ("cya", "see you"),
    ("pls", "please"),
    ("u", "you"),
    ("ur", "your"),
    ("r", "are"),
    ("yolo", "you only live once"),
    ("smol", "small"),
    ("sm", "so much"),
    ("fr", "for real"),
    ("oop", "oops"),
    ("yeet", "throw"),
    ("ngl", "not gonna lie"),
    ("mhm", "yes"),
    ("idc", "I don't care"),
    ("ilu", "I love you"),
    ("ily", "I love you"),
    // punctuated / possessive variants of the common ones
    ("idk*", "I don't know"),
    ("omg*", "oh my god"),
    ("wtf*", "what the frick"),
    ("tbh*", "to be honest"),
    ("ngl*", "not gonna lie"),
    ("tldr*", "too long didn't read"),
];

/// Words the narration must never contain, masked after substitution.
/// Matched with optional trailing letters so inflected forms are caught too.
const CENSORED_WORDS: &[&str] = &[
    "fuck",
    "shit",
    "bitch",
    "asshole",
    "bastard",
    "cunt",
    "whore",
    "slut",
    "piss",
    "prick",
    "dickhead",
    "douchebag",
    "motherfuck",
];

const CENSOR_PLACEHOLDER: &str = "beep";

struct Rule {
    matcher: Regex,
    replacement: String,
}

/// Slang expansion and profanity censoring, built once and reused for the
/// whole batch.
pub struct Normalizer {
    rules: Vec<Rule>,
    censor: Regex,
}

impl Normalizer {
    pub fn new() -> Self {
        let rules = SUBSTITUTIONS
            .iter()
            .map(|(pattern, substitute)| compile_rule(pattern, substitute))
            .collect();
        let censor = Regex::new(&format!(
            r"(?i)\b(?:{})[a-z]*\b",
            CENSORED_WORDS.join("|")
        ))
        .unwrap();
        Self { rules, censor }
    }

    /// Pure transform: expand slang token by token, then censor what is left.
    pub fn clean(&self, text: &str) -> String {
        let substituted = text
            .split_whitespace()
            .map(|token| self.replace_token(token))
            .collect::<Vec<_>>()
            .join(" ");
        self.censor
            .replace_all(&substituted, CENSOR_PLACEHOLDER)
            .into_owned()
    }

    fn replace_token(&self, token: &str) -> String {
        for rule in &self.rules {
            if rule.matcher.is_match(token) {
                return rule
                    .matcher
                    .replace(token, rule.replacement.as_str())
                    .into_owned();
            }
        }
        token.to_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_rule(pattern: &str, substitute: &str) -> Rule {
    let escaped = regex::escape(pattern).replace(r"\*", "(.*)");
    let matcher = Regex::new(&format!("(?i)^{escaped}$")).unwrap();

    let leading = pattern.starts_with('*');
    let trailing = pattern.ends_with('*');
    let replacement = match (leading, trailing) {
        (true, true) => format!("${{1}}{substitute}${{2}}"),
        (true, false) => format!("${{1}}{substitute}"),
        (false, true) => format!("{substitute}${{1}}"),
        (false, false) => substitute.to_string(),
    };

    Rule { matcher, replacement }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_exact_slang() {
        let n = Normalizer::new();
        assert_eq!(n.clean("idk what happened"), "I don't know what happened");
        assert_eq!(n.clean("IDK man"), "I don't know man");
    }

    #[test]
    fn wildcard_keeps_trailing_punctuation() {
        let n = Normalizer::new();
        assert_eq!(n.clean("idk, maybe"), "I don't know, maybe");
        assert_eq!(n.clean("wtf?!"), "what the frick?!");
    }

    #[test]
    fn first_match_in_table_order_wins() {
        let n = Normalizer::new();
        // bare "idk" hits the exact rule, not the "idk*" wildcard
        assert_eq!(n.clean("idk"), "I don't know");
    }

    #[test]
    fn unmatched_tokens_pass_through() {
        let n = Normalizer::new();
        assert_eq!(n.clean("Hello world"), "Hello world");
    }

    #[test]
    fn censors_profanity_and_inflections() {
        let n = Normalizer::new();
        assert_eq!(n.clean("what a shitshow"), "what a beep");
        assert_eq!(n.clean("no Fucking way"), "no beep way");
    }

    #[test]
    fn clean_is_idempotent_on_expanded_text() {
        let n = Normalizer::new();
        let once = n.clean("idk man, tbh this is sus irl");
        assert_eq!(n.clean(&once), once);
    }
}
