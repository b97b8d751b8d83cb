use crate::types::TargetGroup;

/// Built-in lexical target entry
pub(super) struct TargetEntry {
    pub group: TargetGroup,
    pub literal: &'static str,
    pub patterns: &'static [&'static str],
}

const fn entry(
    group: TargetGroup,
    literal: &'static str,
    patterns: &'static [&'static str],
) -> TargetEntry {
    TargetEntry {
        group,
        literal,
        patterns,
    }
}

// Patterns are matched case-insensitively on word boundaries.
// intracranial_pathology is derived and carries no patterns.
pub(super) const TARGET_LEXICON: &[TargetEntry] = &[
    entry(
        TargetGroup::Aneurysm,
        "aneurysm",
        &[r"aneurysms?", r"aneurysmal(\s+dilatation)?"],
    ),
    entry(
        TargetGroup::Anoxic,
        "anoxic brain injury",
        &[
            r"anoxic(\s+brain)?(\s+injury)?",
            r"anoxia",
            r"hypoxic[-\s]ischemic(\s+(injury|encephalopathy))?",
            r"hypoxic(\s+brain)?\s+injury",
        ],
    ),
    entry(
        TargetGroup::Atrophy,
        "atrophy",
        &[
            r"atrophy",
            r"atrophic(\s+changes?)?",
            r"(parenchymal\s+)?volume\s+loss",
            r"involutional\s+changes?",
        ],
    ),
    entry(
        TargetGroup::Cistern,
        "basal cisterns",
        &[
            r"((basal|basilar|perimesencephalic|ambient|quadrigeminal|suprasellar)\s+)?cisterns?",
            r"cisternal\s+spaces?",
        ],
    ),
    entry(
        TargetGroup::Contusion,
        "contusion",
        &[
            r"(hemorrhagic\s+)?contusions?",
            r"contusional(\s+(hemorrhage|injury))?",
        ],
    ),
    entry(
        TargetGroup::DiffuseAxonal,
        "diffuse axonal injury",
        &[
            r"diffuse\s+axonal(\s+injury)?",
            r"shear(ing)?\s+injur(y|ies)",
            r"axonal\s+injury",
            r"dai",
        ],
    ),
    entry(
        TargetGroup::EpiduralHemorrhage,
        "epidural hemorrhage",
        &[
            r"epidural\s+(hemorrhage|haemorrhage|hematoma|blood|collection)s?",
            r"extradural\s+(hemorrhage|hematoma)s?",
            r"edh",
        ],
    ),
    entry(
        TargetGroup::FacialFracture,
        "facial fracture",
        &[
            r"(facial|orbital|maxillary|nasal|zygomatic|zygomaticomaxillary|mandibular|sinus)(\s+(bone|wall|floor))?\s+fractures?",
            r"fractures?\s+of\s+the\s+(orbit|maxilla|mandible|nasal\s+bones?|zygoma)",
            r"le\s*fort(\s+[i]{1,3})?\s+fractures?",
        ],
    ),
    entry(
        TargetGroup::Fluid,
        "extra-axial fluid collection",
        &[
            r"extra-?\s?axial(\s+fluid)?(\s+collections?)?",
            r"(extra-?\s?axial\s+)?fluid\s+collections?",
        ],
    ),
    entry(
        TargetGroup::GrayWhiteDifferentiation,
        "gray-white differentiation",
        &[
            r"gr[ae]y[-\s]white(\s+matter)?(\s+(differentiation|junction|distinction|interface))?",
            r"differentiation\s+(between|of)\s+(the\s+)?gr[ae]y\s+and\s+white\s+matter",
        ],
    ),
    entry(
        TargetGroup::Hemorrhage,
        "hemorrhage",
        &[
            r"(intracranial\s+)?(hemorrhages?|haemorrhages?)",
            r"hemorrhagic\s+(foci|focus|products)",
            r"hematomas?",
            r"bleed(s|ing)?",
        ],
    ),
    entry(
        TargetGroup::Herniation,
        "herniation",
        &[
            r"((uncal|subfalcine|subfalcian|tonsillar|transtentorial|downward|upward)\s+)?herniation",
            r"herniated",
        ],
    ),
    entry(
        TargetGroup::Hydrocephalus,
        "hydrocephalus",
        &[
            r"hydrocephalus",
            r"ventriculomegaly",
            r"ventricular\s+(dilatation|dilation|enlargement)",
        ],
    ),
    entry(
        TargetGroup::Hyperdensities,
        "hyperdensities",
        &[
            r"hyperdens(e|ity|ities)",
            r"hyperattenuat(ing|ion)(\s+(focus|foci|areas?))?",
            r"high\s+attenuation",
        ],
    ),
    entry(
        TargetGroup::Hypodensities,
        "hypodensities",
        &[
            r"hypodens(e|ity|ities)",
            r"hypoattenuat(ing|ion)(\s+(focus|foci|areas?))?",
            r"low\s+attenuation",
        ],
    ),
    entry(TargetGroup::IntracranialPathology, "intracranial pathology", &[]),
    entry(
        TargetGroup::IntraparenchymalHemorrhage,
        "intraparenchymal hemorrhage",
        &[
            r"(intra)?parenchymal\s+(hemorrhage|haemorrhage|hematoma|blood)s?",
            r"intracerebral\s+(hemorrhage|hematoma)s?",
            r"iph",
            r"ich",
        ],
    ),
    entry(
        TargetGroup::IntraventricularHemorrhage,
        "intraventricular hemorrhage",
        &[
            r"intraventricular\s+(hemorrhage|haemorrhage|blood|extension)s?",
            r"ivh",
        ],
    ),
    entry(
        TargetGroup::Ischemia,
        "ischemia",
        &[
            r"ischemi(a|c)(\s+(changes?|infarcts?|strokes?|injury))?",
            r"infarcts?",
            r"infarction",
            r"strokes?",
        ],
    ),
    entry(TargetGroup::MassEffect, "mass effect", &[r"mass\s+effect"]),
    entry(
        TargetGroup::Microhemorrhage,
        "microhemorrhage",
        &[
            r"micro-?\s?hemorrhages?",
            r"micro-?\s?bleeds?",
            r"petechial\s+(hemorrhages?|foci)",
        ],
    ),
    entry(
        TargetGroup::MidlineShift,
        "midline shift",
        &[
            r"midline\s+shift",
            r"shift\s+of\s+(the\s+)?midline(\s+structures)?",
            r"midline\s+deviation",
        ],
    ),
    entry(
        TargetGroup::Pneumocephalus,
        "pneumocephalus",
        &[
            r"pneumocephal(us|y)",
            r"intracranial\s+(air|gas)",
        ],
    ),
    entry(
        TargetGroup::SkullFracture,
        "skull fracture",
        &[
            r"(depressed\s+)?skull\s+fractures?",
            r"(calvarial|basilar\s+skull|skull\s+base|temporal\s+bone|occipital\s+bone|frontal\s+bone|parietal\s+bone)\s+fractures?",
            r"fractures?\s+of\s+the\s+(skull|calvarium)",
        ],
    ),
    entry(
        TargetGroup::SubarachnoidHemorrhage,
        "subarachnoid hemorrhage",
        &[
            r"subarachnoid\s+(hemorrhage|haemorrhage|blood|hematoma)s?",
            r"sah",
        ],
    ),
    entry(
        TargetGroup::SubduralHemorrhage,
        "subdural hemorrhage",
        &[
            r"subdural\s+(hemorrhage|haemorrhage|hematoma|blood|collection|hygroma)s?",
            r"sdh",
        ],
    ),
    entry(
        TargetGroup::Swelling,
        "swelling",
        &[
            r"((cerebral|brain|diffuse)\s+)?swelling",
            r"((cerebral|brain|vasogenic|cytotoxic)\s+)?edema",
            r"sulcal\s+effacement",
        ],
    ),
];
