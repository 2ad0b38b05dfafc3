//! Keyword categorization of article titles.
//!
//! Categories are decided by an ordered rule table: the first rule with a
//! matching keyword wins, and titles matching nothing land in
//! [`DEFAULT_CATEGORY`]. Order matters, e.g. "seguridad" alone routes to the
//! information-security bucket before the occupational-safety rule is reached.

/// Category for titles that match no rule.
pub const DEFAULT_CATEGORY: &str = "ISO_Normas_Generales";

/// How a keyword is matched against the lower-cased title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Substring anywhere in the title.
    Contains(&'static str),
    /// Whole word, bounded by non-alphanumeric characters or the ends.
    Word(&'static str),
}

impl Keyword {
    pub fn matches(&self, title: &str) -> bool {
        match self {
            Keyword::Contains(needle) => title.contains(needle),
            Keyword::Word(word) => title
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == *word),
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub keywords: &'static [Keyword],
    pub category: &'static str,
}

impl CategoryRule {
    pub fn matches(&self, title: &str) -> bool {
        self.keywords.iter().any(|k| k.matches(title))
    }
}

use Keyword::{Contains, Word};

/// Rules in priority order.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &[
            Contains("42001"),
            Contains("inteligencia artificial"),
            // Whole word on purpose: a substring test would match "experiencia".
            Word("ia"),
            Contains("ai act"),
        ],
        category: "ISO_42001_Inteligencia_Artificial",
    },
    CategoryRule {
        keywords: &[Contains("27001"), Contains("seguridad"), Contains("ciberseguridad")],
        category: "ISO_27001_Seguridad_Informacion",
    },
    CategoryRule {
        keywords: &[Contains("9001"), Contains("calidad"), Contains("excelencia")],
        category: "ISO_9001_Gestion_Calidad",
    },
    CategoryRule {
        keywords: &[
            Contains("14001"),
            Contains("medioambiental"),
            Contains("ambiental"),
            Contains("sostenibilidad"),
        ],
        category: "ISO_14001_Gestion_Ambiental",
    },
    CategoryRule {
        keywords: &[Contains("31000"), Contains("riesgo")],
        category: "ISO_31000_Gestion_Riesgos",
    },
    CategoryRule {
        keywords: &[
            Contains("37001"),
            Contains("antisoborno"),
            Contains("soborno"),
            Contains("corrupción"),
        ],
        category: "ISO_37001_Antisoborno",
    },
    CategoryRule {
        keywords: &[
            Contains("20000"),
            Contains("servicios de ti"),
            Contains("tecnología"),
            Contains("informática"),
        ],
        category: "ISO_20000_Servicios_TI",
    },
    CategoryRule {
        keywords: &[Contains("22000"), Contains("alimentaria"), Contains("alimentos")],
        category: "ISO_22000_Seguridad_Alimentaria",
    },
    CategoryRule {
        keywords: &[Contains("37301"), Contains("compliance"), Contains("cumplimiento normativo")],
        category: "ISO_37301_Compliance",
    },
    CategoryRule {
        keywords: &[Contains("22301"), Contains("continuidad"), Contains("crisis")],
        category: "ISO_22301_Continuidad_Negocio",
    },
    CategoryRule {
        keywords: &[Contains("55001"), Contains("activos")],
        category: "ISO_55001_Gestion_Activos",
    },
    CategoryRule {
        keywords: &[Contains("21500"), Contains("proyectos")],
        category: "ISO_21500_Gestion_Proyectos",
    },
    CategoryRule {
        keywords: &[Contains("26000"), Contains("responsabilidad social")],
        category: "ISO_26000_Responsabilidad_Social",
    },
    CategoryRule {
        keywords: &[
            Contains("39001"),
            Contains("seguridad vial"),
            Contains("transporte"),
            Contains("logística"),
        ],
        category: "ISO_39001_Seguridad_Vial",
    },
    CategoryRule {
        keywords: &[Contains("30301"), Contains("documentos"), Contains("gestión documental")],
        category: "ISO_30301_Gestion_Documental",
    },
    CategoryRule {
        keywords: &[Contains("16949"), Contains("automotriz"), Contains("automoción")],
        category: "ISO_16949_Calidad_Automotriz",
    },
    CategoryRule {
        keywords: &[Contains("30401"), Contains("conocimiento")],
        category: "ISO_30401_Gestion_Conocimiento",
    },
    CategoryRule {
        keywords: &[
            Contains("13485"),
            Contains("dispositivos médicos"),
            Contains("médicos"),
            Contains("sanitario"),
        ],
        category: "ISO_13485_Dispositivos_Medicos",
    },
    CategoryRule {
        keywords: &[Contains("28000"), Contains("cadena de suministro"), Contains("supply chain")],
        category: "ISO_28000_Cadena_Suministro",
    },
    CategoryRule {
        keywords: &[
            Contains("45001"),
            Contains("seguridad y salud"),
            Contains("trabajo"),
            Contains("salud ocupacional"),
        ],
        category: "ISO_45001_Seguridad_Salud_Trabajo",
    },
    CategoryRule {
        keywords: &[Contains("50001"), Contains("energética"), Contains("energía")],
        category: "ISO_50001_Gestion_Energetica",
    },
    CategoryRule {
        keywords: &[
            Contains("software"),
            Contains("herramientas"),
            Contains("digital"),
            Contains("automatización"),
        ],
        category: "Herramientas_Digitales_ISO",
    },
];

/// Category for `title` according to [`CATEGORY_RULES`].
pub fn categorize(title: &str) -> &'static str {
    categorize_with(CATEGORY_RULES, title)
}

/// Evaluate an arbitrary rule table in order.
pub fn categorize_with(rules: &[CategoryRule], title: &str) -> &'static str {
    let title = title.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&title))
        .map(|rule| rule.category)
        .unwrap_or(DEFAULT_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_numbers_pick_their_category() {
        assert_eq!(
            categorize("¿Cuáles son los beneficios de la ISO 9001 2026?"),
            "ISO_9001_Gestion_Calidad"
        );
        assert_eq!(
            categorize("AI Act e ISO 42001: directrices de compatibilidad"),
            "ISO_42001_Inteligencia_Artificial"
        );
        assert_eq!(
            categorize("ISO 50001: estrategias para optimizar la gestión energética"),
            "ISO_50001_Gestion_Energetica"
        );
    }

    #[test]
    fn test_priority_order_wins() {
        // "seguridad" is checked before the occupational health rule.
        assert_eq!(
            categorize(
                "ISO 45001: mejores prácticas para la gestión de la seguridad y salud en el trabajo"
            ),
            "ISO_27001_Seguridad_Informacion"
        );
        // "calidad" beats "automatización".
        assert_eq!(
            categorize(
                "Automatización de procesos ISO: cómo las herramientas digitales transforman la gestión de calidad"
            ),
            "ISO_9001_Gestion_Calidad"
        );
    }

    #[test]
    fn test_ia_matches_only_as_a_word() {
        assert_eq!(
            categorize("La IA en la gestión documental"),
            "ISO_42001_Inteligencia_Artificial"
        );
        // "experiencia" contains "ia" but is not about AI.
        assert_eq!(
            categorize("Experiencia en la gestión de proyectos"),
            "ISO_21500_Gestion_Proyectos"
        );
    }

    #[test]
    fn test_unmatched_title_gets_default() {
        assert_eq!(categorize("Novedades del blog"), DEFAULT_CATEGORY);
        assert_eq!(categorize(""), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_custom_rule_table() {
        let rules = [CategoryRule {
            keywords: &[Word("iso")],
            category: "Custom",
        }];
        assert_eq!(categorize_with(&rules, "Todo sobre ISO"), "Custom");
        assert_eq!(categorize_with(&rules, "isotools"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_word_keyword_boundaries() {
        assert!(Word("ia").matches("ia"));
        assert!(Word("ia").matches("la ia, hoy"));
        assert!(!Word("ia").matches("eficiencia"));
        assert!(Contains("ia").matches("eficiencia"));
    }
}
