/// Keyword tables used by the row classifiers.
/// Matching is always done against the trimmed, lowercased cell value.

// Column defaults (match the layout of an Asana CSV export)
pub const DEFAULT_PRIMARY_COLUMN: &str = "Parent task";
pub const DEFAULT_DROP_COLUMN: &str = "name";
pub const DEFAULT_PRIMARY_POSITION: usize = 1;
pub const DEFAULT_OUTPUT_PREFIX: &str = "cleaned_";
pub const DEFAULT_CONFIG_FILE: &str = "cleaner.toml";

// Environment variables
pub const CONFIG_ENV_VAR: &str = "CSV_CLEANER_CONFIG";
pub const LOG_DIR_ENV_VAR: &str = "CSV_CLEANER_LOG_DIR";

/// Substrings that suggest a street, unit or geographic location.
/// Some entries carry punctuation or padding on purpose ("st.", " s ") so that
/// short abbreviations only hit in address-shaped text.
pub const ADDRESS_INDICATORS: &[&str] = &[
    "street", "st,", "st.", "avenue", "ave", "road", "rd", "boulevard", "blvd",
    "drive", "dr", "lane", "ln", "court", "ct", "place", "pl", "way",
    "floor", "suite", "ste", "unit", "building", "bldg",
    "apartment", "apt", "house", "box", "po box",
    "city", "state", "zip", "postal",
    "north", "south", "east", "west", "n ", " s ", " e ", " w ",
    "#", "unit ", "apt ", "ste ",
];

/// Substrings that mark a value as task text rather than a location.
pub const TASK_MARKERS: &[&str] = &[
    "call", "email", "send", "follow up", "followup", "check", "review",
    "submit", "complete", "finish", "update", "prepare", "schedule",
    "arrange", "confirm", "verify", "process", "create", "draft",
    "research", "investigate", "analyze", "organize", "file",
    "pick up", "drop off", "deliver", "install", "fix", "repair",
    "clean", "paint", "replace", "order", "purchase", "buy",
    "meeting", "note", "task", "todo", "reminder", "deadline",
    "asap", "urgent", "priority", "high", "low", "medium",
];

/// Verb substrings that mark an action item wherever they appear
/// ("Call landlord", "Need to fix gutter").
pub const ACTION_VERBS: &[&str] = &[
    "call", "email", "send", "submit", "fix", "repair", "review", "check",
    "schedule", "confirm", "verify", "prepare", "update", "complete", "finish",
    "order", "buy", "purchase", "install", "replace", "clean", "paint",
    "deliver", "pick up", "drop off", "follow up", "draft", "create",
    "research", "organize", "arrange",
];

/// Phrases that mark an action item wherever they appear.
pub const ACTION_MARKERS: &[&str] = &[
    "follow up", "followup", "follow-up", "asap", "urgent", "todo", "to do",
    "to-do", "reminder", "deadline", "due ", "waiting on",
];

/// Whole-word keywords for pattern mode: street types spelled out, unit and
/// building markers, and administrative geography.
pub const PATTERN_LOCATION_WORDS: &[&str] = &[
    "street", "avenue", "road", "boulevard", "drive", "lane", "court", "place",
    "parkway", "highway", "terrace", "circle", "suite", "floor", "unit",
    "building", "bldg", "apartment", "apt", "ste", "city", "state", "zip",
    "postal",
];

/// Street-type abbreviations for pattern mode. These only count after a
/// leading house number ("123 Main St") since alone they are too ambiguous.
pub const PATTERN_STREET_TYPES: &[&str] = &[
    "st", "ave", "av", "rd", "blvd", "dr", "ln", "ct", "pl", "way", "pkwy",
    "hwy", "ter", "cir", "sq", "trl", "street", "avenue", "road", "boulevard",
    "drive", "lane", "court", "place",
];

pub const PATTERN_DIRECTIONS: &[&str] = &[
    "north", "south", "east", "west", "northeast", "northwest", "southeast",
    "southwest", "ne", "nw", "se", "sw",
];

/// Minimum whitespace-separated tokens before the "number + street type"
/// pattern is trusted.
pub const PATTERN_MIN_STREET_TOKENS: usize = 3;
