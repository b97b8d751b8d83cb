use crate::types::{ModifierCategory, ScopeDirection};

use ModifierCategory::*;
use ScopeDirection::*;

/// Built-in lexical modifier entry
///
/// When `pattern` is `None` the literal itself is matched, with any run of
/// whitespace accepted between its words.
pub(super) struct ModifierEntry {
    pub literal: &'static str,
    pub category: ModifierCategory,
    pub direction: ScopeDirection,
    pub pattern: Option<&'static str>,
}

const fn m(
    literal: &'static str,
    category: ModifierCategory,
    direction: ScopeDirection,
) -> ModifierEntry {
    ModifierEntry {
        literal,
        category,
        direction,
        pattern: None,
    }
}

const fn mp(
    literal: &'static str,
    category: ModifierCategory,
    direction: ScopeDirection,
    pattern: &'static str,
) -> ModifierEntry {
    ModifierEntry {
        literal,
        category,
        direction,
        pattern: Some(pattern),
    }
}

pub(super) const MODIFIER_LEXICON: &[ModifierEntry] = &[
    // absent
    m("no", Absent, Forward),
    m("not", Absent, Forward),
    m("without", Absent, Forward),
    m("no evidence of", Absent, Forward),
    m("no evidence for", Absent, Forward),
    m("no acute", Absent, Forward),
    m("no definite", Absent, Forward),
    m("no significant", Absent, Forward),
    mp("no sign of", Absent, Forward, r"no\s+signs?\s+of"),
    m("negative for", Absent, Forward),
    m("free of", Absent, Forward),
    m("absence of", Absent, Forward),
    m("resolution of", Absent, Forward),
    m("interval resolution of", Absent, Forward),
    mp("is absent", Absent, Backward, r"(is|are)\s+absent"),
    mp("is not seen", Absent, Backward, r"((is|are)\s+)?not\s+(seen|identified|visualized|demonstrated|present)"),
    mp("has resolved", Absent, Backward, r"(has|have)\s+resolved"),
    m("ruled out", Absent, Backward),
    m("absent", Absent, Bidirectional),
    // suspected
    m("possible", Suspected, Forward),
    m("probable", Suspected, Forward),
    m("likely", Suspected, Forward),
    m("suspicious for", Suspected, Forward),
    m("suggestive of", Suspected, Forward),
    m("concerning for", Suspected, Forward),
    m("worrisome for", Suspected, Forward),
    m("may represent", Suspected, Forward),
    m("questionable", Suspected, Forward),
    mp("is suspected", Suspected, Backward, r"(is|are)\s+suspected"),
    mp("is likely", Suspected, Backward, r"(is|are)\s+(likely|probable|possible)"),
    m("suspected", Suspected, Bidirectional),
    // indeterminate
    m("cannot rule out", Indeterminate, Forward),
    m("can not rule out", Indeterminate, Forward),
    m("cannot exclude", Indeterminate, Forward),
    m("equivocal for", Indeterminate, Forward),
    m("differential includes", Indeterminate, Forward),
    m("versus", Indeterminate, Bidirectional),
    mp("cannot be excluded", Indeterminate, Backward, r"(cannot|can\s+not)\s+be\s+(excluded|ruled\s+out)"),
    m("not excluded", Indeterminate, Backward),
    m("of uncertain significance", Indeterminate, Backward),
    m("indeterminate", Indeterminate, Bidirectional),
    m("equivocal", Indeterminate, Bidirectional),
    m("uncertain", Indeterminate, Bidirectional),
    // present
    mp("there is", Present, Forward, r"there\s+(is|are)"),
    m("evidence of", Present, Forward),
    m("positive for", Present, Forward),
    m("consistent with", Present, Forward),
    m("compatible with", Present, Forward),
    m("findings of", Present, Forward),
    mp("demonstrates", Present, Forward, r"(demonstrates|shows|reveals)"),
    m("redemonstration of", Present, Forward),
    m("acute", Present, Forward),
    m("small", Present, Forward),
    m("large", Present, Forward),
    m("mild", Present, Forward),
    m("moderate", Present, Forward),
    m("severe", Present, Forward),
    m("new", Present, Forward),
    mp("is present", Present, Backward, r"(is|are)\s+(present|seen|noted|identified|again\s+seen|redemonstrated)"),
    m("persists", Present, Backward),
    m("present", Present, Bidirectional),
    m("seen", Present, Bidirectional),
    m("noted", Present, Bidirectional),
    // normal
    m("normal", Normal, Bidirectional),
    m("preserved", Normal, Bidirectional),
    m("maintained", Normal, Bidirectional),
    m("intact", Normal, Bidirectional),
    m("patent", Normal, Bidirectional),
    m("unremarkable", Normal, Bidirectional),
    m("within normal limits", Normal, Bidirectional),
    // abnormal
    m("loss of", Abnormal, Forward),
    m("effacement of", Abnormal, Forward),
    m("blurring of", Abnormal, Forward),
    m("decreased", Abnormal, Bidirectional),
    m("effaced", Abnormal, Bidirectional),
    m("compressed", Abnormal, Bidirectional),
    m("abnormal", Abnormal, Bidirectional),
    m("indistinct", Abnormal, Bidirectional),
    m("poorly defined", Abnormal, Bidirectional),
    m("obscured", Abnormal, Bidirectional),
    // termination
    m("but", Termination, Bidirectional),
    m("however", Termination, Bidirectional),
    m("although", Termination, Bidirectional),
    m("though", Termination, Bidirectional),
    m("which", Termination, Bidirectional),
    m("except", Termination, Bidirectional),
    m("aside from", Termination, Bidirectional),
    m("apart from", Termination, Bidirectional),
    m("other than", Termination, Bidirectional),
    m("with the exception of", Termination, Bidirectional),
    // pseudo
    m("no change", Pseudo, Bidirectional),
    m("no interval change", Pseudo, Bidirectional),
    m("no significant change", Pseudo, Bidirectional),
    mp("no increase", Pseudo, Bidirectional, r"no\s+(interval\s+)?increase"),
    m("not only", Pseudo, Bidirectional),
    m("not necessarily", Pseudo, Bidirectional),
    m("without change", Pseudo, Bidirectional),
];
