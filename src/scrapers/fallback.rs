//! Hand-curated entries substituted when a scrape yields nothing.
//!
//! This is a degradation path, not a cache: the list is constant and carries
//! no freshness information. Records built from it are tagged
//! [`DataSource::Fallback`](crate::models::DataSource::Fallback) downstream.

use crate::models::ArticleStub;
use chrono::Utc;

struct FallbackEntry {
    title: &'static str,
    url: &'static str,
    image_url: &'static str,
    page_found: u32,
}

const FALLBACK_ENTRIES: &[FallbackEntry] = &[
    FallbackEntry {
        title: "¿Cómo decidir si la certificación del estándar ISO 42001 es la opción adecuada para su organización?",
        url: "https://www.isotools.us/2025/09/25/como-decidir-si-la-certificacion-del-estandar-iso-42001-es-la-opcion-adecuada-para-su-organizacion/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/09/iso-42001-certificacion-organizacion.jpg",
        page_found: 1,
    },
    FallbackEntry {
        title: "Calidad 5.0: cómo la inteligencia artificial y el factor humano transforman la excelencia operativa",
        url: "https://www.isotools.us/2025/09/23/calidad-5-0-como-la-inteligencia-artificial-y-el-factor-humano-transforman-la-excelencia-operativa/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/09/calidad-5-0-como-la-inteligencia-artificial-y-el-factor-humano-transforman-la-excelencia-operativa.jpg",
        page_found: 1,
    },
    FallbackEntry {
        title: "Cumplimiento ISO 27001: los 9 pasos esenciales para preparar tu certificación",
        url: "https://www.isotools.us/2025/09/16/cumplimiento-iso-27001-los-9-pasos-esenciales-para-preparar-tu-certificacion/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/09/cumplimiento-iso-27001-certificacion.jpg",
        page_found: 1,
    },
    FallbackEntry {
        title: "¿Cuáles son los beneficios de la ISO 9001 2026?",
        url: "https://www.isotools.us/2025/09/15/cuales-son-los-beneficios-de-la-iso-9001-2026/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/09/beneficios-iso-9001-2026.jpg",
        page_found: 1,
    },
    FallbackEntry {
        title: "Software de gestión medioambiental: 7 requisitos clave para elegir la mejor solución para tu empresa",
        url: "https://www.isotools.us/2025/09/09/software-de-gestion-medioambiental-7-requisitos-clave-para-elegir-la-mejor-solucion-para-tu-empresa/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/09/software-gestion-medioambiental.jpg",
        page_found: 1,
    },
    FallbackEntry {
        title: "ISO 45001: mejores prácticas para la gestión de la seguridad y salud en el trabajo",
        url: "https://www.isotools.us/2025/09/05/iso-45001-mejores-practicas-para-la-gestion-de-la-seguridad-y-salud-en-el-trabajo/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/09/iso-45001-seguridad-salud-trabajo.jpg",
        page_found: 2,
    },
    FallbackEntry {
        title: "Automatización de procesos ISO: cómo las herramientas digitales transforman la gestión de calidad",
        url: "https://www.isotools.us/2025/08/30/automatizacion-de-procesos-iso-como-las-herramientas-digitales-transforman-la-gestion-de-calidad/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/08/automatizacion-procesos-iso.jpg",
        page_found: 2,
    },
    FallbackEntry {
        title: "ISO 50001: estrategias avanzadas para optimizar la gestión energética empresarial",
        url: "https://www.isotools.us/2025/08/25/iso-50001-estrategias-avanzadas-para-optimizar-la-gestion-energetica-empresarial/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/08/iso-50001-gestion-energetica.jpg",
        page_found: 2,
    },
    FallbackEntry {
        title: "Gestión de riesgos ISO 31000: metodología integral para la identificación y mitigación",
        url: "https://www.isotools.us/2025/08/20/gestion-de-riesgos-iso-31000-metodologia-integral-para-la-identificacion-y-mitigacion/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/08/iso-31000-gestion-riesgos.jpg",
        page_found: 3,
    },
    FallbackEntry {
        title: "ISO 37001: implementación efectiva de sistemas antisoborno en organizaciones",
        url: "https://www.isotools.us/2025/08/15/iso-37001-implementacion-efectiva-de-sistemas-antisoborno-en-organizaciones/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/08/iso-37001-antisoborno.jpg",
        page_found: 3,
    },
    FallbackEntry {
        title: "Transformación digital en la gestión ISO: herramientas y mejores prácticas 2025",
        url: "https://www.isotools.us/2025/08/10/transformacion-digital-en-la-gestion-iso-herramientas-y-mejores-practicas-2025/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/08/transformacion-digital-iso.jpg",
        page_found: 3,
    },
    FallbackEntry {
        title: "ISO 20000: gestión de servicios de TI y su impacto en la eficiencia operativa",
        url: "https://www.isotools.us/2025/08/05/iso-20000-gestion-de-servicios-de-ti-y-su-impacto-en-la-eficiencia-operativa/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/08/iso-20000-servicios-ti.jpg",
        page_found: 4,
    },
    FallbackEntry {
        title: "Auditorías internas ISO: metodología avanzada para el control de calidad empresarial",
        url: "https://www.isotools.us/2025/07/30/auditorias-internas-iso-metodologia-avanzada-para-el-control-de-calidad-empresarial/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/07/auditorias-internas-iso.jpg",
        page_found: 4,
    },
    FallbackEntry {
        title: "ISO 22000: sistemas de gestión de seguridad alimentaria en la industria moderna",
        url: "https://www.isotools.us/2025/07/25/iso-22000-sistemas-de-gestion-de-seguridad-alimentaria-en-la-industria-moderna/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/07/iso-22000-seguridad-alimentaria.jpg",
        page_found: 4,
    },
    FallbackEntry {
        title: "Compliance normativo: estrategias para el cumplimiento de múltiples estándares ISO",
        url: "https://www.isotools.us/2025/07/20/compliance-normativo-estrategias-para-el-cumplimiento-de-multiples-estandares-iso/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/07/compliance-normativo-iso.jpg",
        page_found: 5,
    },
    FallbackEntry {
        title: "ISO 37301: sistemas de gestión de compliance y su implementación práctica",
        url: "https://www.isotools.us/2025/07/15/iso-37301-sistemas-de-gestion-de-compliance-y-su-implementacion-practica/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/07/iso-37301-compliance.jpg",
        page_found: 5,
    },
    FallbackEntry {
        title: "Gestión de la continuidad del negocio ISO 22301: preparación ante crisis empresariales",
        url: "https://www.isotools.us/2025/07/10/gestion-de-la-continuidad-del-negocio-iso-22301-preparacion-ante-crisis-empresariales/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/07/iso-22301-continuidad-negocio.jpg",
        page_found: 5,
    },
    FallbackEntry {
        title: "ISO 55001: gestión de activos físicos y su optimización en el ciclo de vida",
        url: "https://www.isotools.us/2025/07/05/iso-55001-gestion-de-activos-fisicos-y-su-optimizacion-en-el-ciclo-de-vida/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/07/iso-55001-gestion-activos.jpg",
        page_found: 6,
    },
    FallbackEntry {
        title: "Integración de sistemas de gestión ISO: metodología para el enfoque holístico",
        url: "https://www.isotools.us/2025/06/30/integracion-de-sistemas-de-gestion-iso-metodologia-para-el-enfoque-holistico/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/06/integracion-sistemas-iso.jpg",
        page_found: 6,
    },
    FallbackEntry {
        title: "ISO 21500: gestión de proyectos según estándares internacionales de calidad",
        url: "https://www.isotools.us/2025/06/25/iso-21500-gestion-de-proyectos-segun-estandares-internacionales-de-calidad/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/06/iso-21500-gestion-proyectos.jpg",
        page_found: 6,
    },
    FallbackEntry {
        title: "Sostenibilidad empresarial ISO 26000: responsabilidad social corporativa efectiva",
        url: "https://www.isotools.us/2025/06/20/sostenibilidad-empresarial-iso-26000-responsabilidad-social-corporativa-efectiva/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/06/iso-26000-responsabilidad-social.jpg",
        page_found: 7,
    },
    FallbackEntry {
        title: "ISO 39001: gestión de la seguridad vial en el transporte y logística empresarial",
        url: "https://www.isotools.us/2025/06/15/iso-39001-gestion-de-la-seguridad-vial-en-el-transporte-y-logistica-empresarial/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/06/iso-39001-seguridad-vial.jpg",
        page_found: 7,
    },
    FallbackEntry {
        title: "Gestión documental ISO: digitalización y control de documentos en sistemas de calidad",
        url: "https://www.isotools.us/2025/06/10/gestion-documental-iso-digitalizacion-y-control-de-documentos-en-sistemas-de-calidad/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/06/gestion-documental-iso.jpg",
        page_found: 7,
    },
    FallbackEntry {
        title: "ISO 30301: sistemas de gestión para documentos y su impacto en la eficiencia",
        url: "https://www.isotools.us/2025/06/05/iso-30301-sistemas-de-gestion-para-documentos-y-su-impacto-en-la-eficiencia/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/06/iso-30301-gestion-documentos.jpg",
        page_found: 8,
    },
    FallbackEntry {
        title: "Medición y análisis de indicadores ISO: KPIs para la mejora continua organizacional",
        url: "https://www.isotools.us/2025/05/30/medicion-y-analisis-de-indicadores-iso-kpis-para-la-mejora-continua-organizacional/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/05/indicadores-kpis-iso.jpg",
        page_found: 8,
    },
    FallbackEntry {
        title: "ISO 16949: sistemas de gestión de calidad automotriz y su certificación",
        url: "https://www.isotools.us/2025/05/25/iso-16949-sistemas-de-gestion-de-calidad-automotriz-y-su-certificacion/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/05/iso-16949-calidad-automotriz.jpg",
        page_found: 8,
    },
    FallbackEntry {
        title: "Gestión del conocimiento ISO 30401: estrategias para la organización inteligente",
        url: "https://www.isotools.us/2025/05/20/gestion-del-conocimiento-iso-30401-estrategias-para-la-organizacion-inteligente/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/05/iso-30401-gestion-conocimiento.jpg",
        page_found: 9,
    },
    FallbackEntry {
        title: "ISO 13485: sistemas de gestión de calidad para dispositivos médicos",
        url: "https://www.isotools.us/2025/05/15/iso-13485-sistemas-de-gestion-de-calidad-para-dispositivos-medicos/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/05/iso-13485-dispositivos-medicos.jpg",
        page_found: 9,
    },
    FallbackEntry {
        title: "Cultura organizacional y normas ISO: desarrollo del liderazgo en sistemas de gestión",
        url: "https://www.isotools.us/2025/05/10/cultura-organizacional-y-normas-iso-desarrollo-del-liderazgo-en-sistemas-de-gestion/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/05/cultura-organizacional-iso.jpg",
        page_found: 9,
    },
    FallbackEntry {
        title: "ISO 28000: gestión de la seguridad en la cadena de suministro global",
        url: "https://www.isotools.us/2025/05/05/iso-28000-gestion-de-la-seguridad-en-la-cadena-de-suministro-global/",
        image_url: "https://www.isotools.us/wp-content/uploads/2025/05/iso-28000-cadena-suministro.jpg",
        page_found: 10,
    },
];

/// The fallback list as stubs, stamped with the current time.
pub fn fallback_articles() -> Vec<ArticleStub> {
    let now = Utc::now();
    FALLBACK_ENTRIES
        .iter()
        .map(|entry| ArticleStub {
            title: entry.title.to_string(),
            url: entry.url.to_string(),
            image_url: Some(entry.image_url.to_string()),
            post_code: None,
            page_found: entry.page_found,
            extracted_at: now,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_urls_are_unique_and_absolute() {
        let articles = fallback_articles();
        assert_eq!(articles.len(), 30);

        let urls: HashSet<_> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls.len(), articles.len());
        assert!(articles.iter().all(|a| a.url.starts_with("https://www.isotools.us/")));
        assert!(articles.iter().all(|a| !a.title.trim().is_empty()));
    }

    #[test]
    fn test_fallback_is_in_page_order() {
        let pages: Vec<_> = fallback_articles().iter().map(|a| a.page_found).collect();
        assert!(pages.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(pages[0], 1);
    }
}
