/// Emoji replaced by their CLDR short name before scoring
pub const EMOJI: &[(char, &str)] = &[
    ('\u{1F600}', "grinning face"),
    ('\u{1F601}', "beaming face with smiling eyes"),
    ('\u{1F602}', "face with tears of joy"),
    ('\u{1F603}', "grinning face with big eyes"),
    ('\u{1F604}', "grinning face with smiling eyes"),
    ('\u{1F60A}', "smiling face with smiling eyes"),
    ('\u{1F60D}', "smiling face with heart-eyes"),
    ('\u{1F642}', "slightly smiling face"),
    ('\u{1F970}', "smiling face with hearts"),
    ('\u{1F44D}', "thumbs up"),
    ('\u{1F44E}', "thumbs down"),
    ('\u{1F389}', "party popper"),
    ('\u{1F31F}', "glowing star"),
    ('\u{2B50}', "star"),
    ('\u{2764}', "red heart"),
    ('\u{1F494}', "broken heart"),
    ('\u{1F641}', "slightly frowning face"),
    ('\u{2639}', "frowning face"),
    ('\u{1F61E}', "disappointed face"),
    ('\u{1F622}', "crying face"),
    ('\u{1F62D}', "loudly crying face"),
    ('\u{1F620}', "angry face"),
    ('\u{1F621}', "pouting face"),
    ('\u{1F92C}', "face with symbols on mouth"),
    ('\u{1F631}', "face screaming in fear"),
    ('\u{1F610}', "neutral face"),
];
