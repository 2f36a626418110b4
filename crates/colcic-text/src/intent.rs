use crate::normalize::normalize;

/// One topic intent: a tag, the canonical phrase used for the
/// intent-driven FAQ lookup, and the trigger keyword phrases
/// (pre-normalized).
#[derive(Debug, Clone)]
pub struct IntentDef {
    pub tag: &'static str,
    pub canonical: &'static str,
    pub keywords: &'static [&'static str],
}

/// Priority-ordered keyword dispatch over a closed set of topics.
///
/// Held as an ordered list, not a map: some intents are linguistic
/// subsets of others ("vice coordenador" contains "coordenador"), so the
/// higher-specificity intent must be scanned first.
pub struct IntentDetector {
    intents: Vec<IntentDef>,
}

impl IntentDetector {
    pub fn new(intents: Vec<IntentDef>) -> Self {
        Self { intents }
    }

    /// The institutional topic table. Order is the tie-break.
    pub fn with_defaults() -> Self {
        Self::new(vec![
            IntentDef {
                tag: "vice-coordenador",
                canonical: "vice coordenador",
                keywords: &["vice coordenador", "vice coordenadora", "vicecoordenador", "vice do colegiado"],
            },
            IntentDef {
                tag: "coordenador",
                canonical: "coordenador",
                keywords: &["coordenador", "coordenadora", "coordenacao"],
            },
            IntentDef {
                tag: "conselho",
                canonical: "conselho",
                keywords: &["consu", "consepe", "conselho superior", "conselho", "colcic", "colegiado"],
            },
            IntentDef {
                tag: "carga-horaria",
                canonical: "carga horaria",
                keywords: &["carga horaria", "creditos", "horas do curso"],
            },
        ])
    }

    /// First intent (in priority order) with any keyword phrase contained
    /// in the normalized text, else `None`.
    pub fn detect(&self, text: &str) -> Option<&IntentDef> {
        let norm = normalize(text);
        if norm.is_empty() {
            return None;
        }
        self.intents
            .iter()
            .find(|i| i.keywords.iter().any(|k| norm.contains(k)))
    }
}
