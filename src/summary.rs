//! Summary fabrication for article titles.
//!
//! With an LLM client configured, each title is turned into a prompt that
//! frames the model as a consultant for the ISO standard the title mentions
//! and steers it toward one angle picked from the title's keywords. Without a
//! client, or when the request fails, a keyword-indexed template is used.

use crate::api::AskAsync;
use crate::categories::categorize;
use crate::models::{ArticleStub, DataSource, ProcessedArticle};
use crate::utils::truncate_for_log;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

static ISO_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)ISO\s*(\d+)").unwrap());

const DEFAULT_CONTEXT: &str = "sistemas de gestión normalizados";
const DEFAULT_ANGLE: &str = "optimización operacional y mejora continua";

/// Subject area of each ISO standard, used to pick the consultant persona.
const ISO_CONTEXTS: &[(&str, &str)] = &[
    ("9001", "gestión de calidad y satisfacción del cliente"),
    ("14001", "gestión ambiental y sostenibilidad empresarial"),
    ("45001", "seguridad y salud ocupacional en el trabajo"),
    ("27001", "seguridad de la información y ciberseguridad"),
    ("50001", "gestión energética y eficiencia en consumo"),
    ("22000", "seguridad alimentaria y control de riesgos"),
    ("37001", "sistemas anti-soborno y ética empresarial"),
    ("55001", "gestión de activos físicos y optimización"),
    ("21500", "dirección y gestión de proyectos exitosos"),
    ("26000", "responsabilidad social corporativa"),
    ("37301", "compliance management y cumplimiento normativo"),
    ("22301", "continuidad del negocio y gestión de crisis"),
    ("39001", "seguridad vial en transporte y logística"),
    ("30401", "gestión del conocimiento organizacional"),
    ("16949", "calidad automotriz y manufacturing"),
    ("13485", "dispositivos médicos y regulación sanitaria"),
    ("28000", "seguridad en cadena de suministro"),
    ("42001", "inteligencia artificial y sistemas IA éticos"),
];

/// Angle of the summary, first match wins.
const ANGLES: &[(&[&str], &str)] = &[
    (&["digital", "automatización"], "transformación digital y automatización de procesos"),
    (&["auditoria", "auditor"], "auditorías internas y control de cumplimiento"),
    (&["kpi", "indicador", "medición"], "medición de indicadores y análisis de desempeño"),
    (&["compliance", "cumplimiento"], "cumplimiento regulatorio y gestión de riesgos"),
    (&["software", "herramienta"], "herramientas tecnológicas y software especializado"),
    (&["industria 4.0", "blockchain"], "tecnologías emergentes e Industria 4.0"),
    (&["laboratorio", "calibración"], "gestión de laboratorios y metrología"),
    (&["riesgo", "crisis"], "gestión de riesgos y continuidad operacional"),
];

/// Canned summaries, first rule whose keyword appears in the title wins.
const TEMPLATES: &[(&[&str], &str)] = &[
    (&["42001"], "La implementación de ISO 42001 permite a las organizaciones establecer sistemas de gestión de inteligencia artificial robustos y éticos. Esta norma facilita la integración responsable de tecnologías IA en procesos empresariales, mejorando la toma de decisiones mientras garantiza transparencia y cumplimiento normativo. Las empresas obtienen ventajas competitivas significativas al optimizar operaciones con IA de manera estructurada y segura."),
    (&["27001"], "ISO 27001 establece un marco integral para la gestión de la seguridad de la información, permitiendo a las organizaciones proteger activos críticos y datos sensibles. Su implementación reduce riesgos cibernéticos, mejora la confianza de clientes y socios, y asegura continuidad operativa. Las empresas certificadas demuestran compromiso con la excelencia en ciberseguridad y cumplimiento regulatorio."),
    (&["9001"], "La norma ISO 9001 proporciona un sistema de gestión de calidad probado que mejora la satisfacción del cliente y la eficiencia operativa. Su implementación genera procesos más consistentes, reduce costos por fallos de calidad y fortalece la competitividad en el mercado. Las organizaciones certificadas experimentan mayor productividad y reconocimiento internacional por su compromiso con la excelencia."),
    (&["14001"], "ISO 14001 permite a las organizaciones desarrollar sistemas de gestión ambiental efectivos que minimizan el impacto ecológico y optimizan el uso de recursos. Esta norma facilita el cumplimiento de regulaciones ambientales, reduce costos operativos y mejora la reputación corporativa. Las empresas implementadoras demuestran responsabilidad ambiental y sostenibilidad a largo plazo."),
    (&["45001"], "La implementación de ISO 45001 establece sistemas robustos de gestión de seguridad y salud ocupacional que protegen a los trabajadores y mejoran el ambiente laboral. Esta norma reduce accidentes laborales, disminuye costos asociados a incidentes y fortalece la cultura de seguridad organizacional. Las empresas certificadas demuestran compromiso genuino con el bienestar de sus empleados y responsabilidad social."),
    (&["31000"], "ISO 31000 proporciona principios y directrices para la gestión integral de riesgos organizacionales, mejorando la toma de decisiones estratégicas. Su aplicación permite identificar, evaluar y mitigar riesgos de manera sistemática, protegiendo objetivos empresariales y creando valor sostenible. Las organizaciones desarrollan mayor resiliencia y capacidad de adaptación ante incertidumbres del mercado."),
    (&["37001"], "La norma ISO 37001 establece sistemas de gestión antisoborno que fortalecen la integridad organizacional y previenen prácticas corruptas. Su implementación mejora la reputación empresarial, facilita el acceso a mercados internacionales y reduce riesgos legales y financieros. Las organizaciones certificadas demuestran compromiso ético y transparencia en todas sus operaciones comerciales."),
    (&["50001"], "ISO 50001 permite a las organizaciones desarrollar sistemas de gestión energética que optimizan el consumo y reducen costos operativos significativamente. Esta norma facilita la identificación de oportunidades de ahorro energético, mejora la eficiencia de procesos y contribuye a objetivos de sostenibilidad. Las empresas implementadoras logran ventajas competitivas y demuestran responsabilidad ambiental."),
    (&["20000"], "La implementación de ISO 20000 optimiza la gestión de servicios de TI, mejorando la calidad del servicio y la satisfacción del usuario final. Esta norma establece procesos eficientes para la entrega y soporte de servicios tecnológicos, reduciendo tiempos de inactividad y costos operativos. Las organizaciones certificadas demuestran excelencia en gestión de TI y capacidad de respuesta ante necesidades tecnológicas."),
    (&["22000"], "ISO 22000 establece sistemas de gestión de seguridad alimentaria que garantizan la producción de alimentos seguros para el consumo. Su implementación mejora la trazabilidad, reduce riesgos de contaminación y fortalece la confianza del consumidor. Las organizaciones certificadas acceden a mercados exigentes y demuestran compromiso con la salud pública y calidad alimentaria."),
    (&["calidad 5.0", "inteligencia artificial"], "La convergencia de inteligencia artificial y gestión de calidad revoluciona los procesos empresariales, creando sistemas más inteligentes y adaptativos. Esta evolución hacia la Calidad 5.0 mejora la eficiencia operativa, reduce errores humanos y optimiza la toma de decisiones basada en datos. Las organizaciones pioneras obtienen ventajas competitivas significativas al integrar IA en sus sistemas de gestión de calidad."),
    (&["auditorías", "auditorias"], "Las auditorías internas efectivas fortalecen los sistemas de gestión de calidad y aseguran el cumplimiento continuo de requisitos normativos. Su implementación sistemática identifica oportunidades de mejora, previene no conformidades y optimiza procesos organizacionales. Las empresas con programas de auditoría robustos mantienen certificaciones vigentes y demuestran compromiso con la excelencia operativa."),
    (&["automatización", "digital"], "La automatización de procesos ISO mediante herramientas digitales transforma la gestión de calidad, mejorando la eficiencia y reduciendo errores manuales. Esta digitalización facilita el monitoreo en tiempo real, optimiza flujos de trabajo y mejora la trazabilidad de procesos. Las organizaciones tecnológicamente avanzadas logran mayor competitividad y capacidad de respuesta ante cambios del mercado."),
    (&["gestión de riesgo"], "La gestión integral de riesgos permite a las organizaciones anticipar amenazas, proteger activos críticos y mantener continuidad operativa. Su implementación sistemática mejora la resiliencia empresarial, facilita la toma de decisiones informadas y optimiza la asignación de recursos. Las empresas con gestión de riesgos efectiva demuestran mayor estabilidad y confianza ante stakeholders."),
    (&["55001", "activos"], "ISO 55001 optimiza la gestión de activos físicos durante todo su ciclo de vida, maximizando valor y minimizando costos operativos. Esta norma mejora la planificación de mantenimiento, reduce fallas imprevistas y extiende la vida útil de equipos críticos. Las organizaciones implementadoras logran mayor eficiencia operacional y retorno de inversión en infraestructura."),
    (&["21500", "proyectos"], "ISO 21500 establece metodologías robustas para la gestión efectiva de proyectos, mejorando tasas de éxito y entrega de resultados. Su aplicación optimiza la planificación, ejecución y control de proyectos complejos, reduciendo sobrecostos y retrasos. Las organizaciones certificadas demuestran competencia en dirección de proyectos y capacidad de lograr objetivos estratégicos."),
    (&["26000", "responsabilidad social"], "ISO 26000 guía a las organizaciones hacia prácticas de responsabilidad social que fortalecen la reputación corporativa y generan valor compartido. Su implementación mejora las relaciones con stakeholders, reduce riesgos reputacionales y contribuye al desarrollo sostenible. Las empresas socialmente responsables acceden a nuevos mercados y talentos comprometidos con valores éticos."),
    (&["37301", "compliance"], "ISO 37301 establece sistemas robustos de gestión de compliance que aseguran el cumplimiento normativo y reducen riesgos legales. Su implementación fortalece la gobernanza corporativa, mejora la transparencia operativa y facilita el acceso a mercados regulados. Las organizaciones certificadas demuestran integridad y compromiso con el cumplimiento de todas las regulaciones aplicables."),
    (&["22301", "continuidad"], "ISO 22301 desarrolla capacidades de continuidad del negocio que garantizan operaciones resilientes ante disrupciones críticas. Esta norma mejora la preparación ante crisis, reduce tiempos de recuperación y protege la reputación empresarial. Las organizaciones implementadoras mantienen servicios esenciales y demuestran confiabilidad ante clientes y stakeholders."),
    (&["39001", "seguridad vial"], "ISO 39001 establece sistemas de gestión de seguridad vial que protegen vidas y reducen accidentes en operaciones de transporte. Su implementación mejora la cultura de seguridad, reduce costos asociados a siniestros y fortalece la responsabilidad social corporativa. Las empresas certificadas demuestran compromiso con la seguridad pública y operaciones de transporte responsables."),
    (&["gestión documental", "documentos"], "Los sistemas de gestión documental ISO optimizan el control, acceso y trazabilidad de información crítica organizacional. Su implementación digitaliza procesos documentales, mejora la eficiencia administrativa y asegura el cumplimiento de requisitos normativos. Las empresas con gestión documental efectiva reducen errores, aceleran procesos y mantienen información siempre actualizada."),
    (&["indicadores", "kpis", "medición"], "La medición y análisis de indicadores ISO proporciona datos objetivos para la mejora continua y toma de decisiones estratégicas. Su implementación identifica oportunidades de optimización, evalúa eficacia de procesos y demuestra el retorno de inversión en sistemas de gestión. Las organizaciones orientadas a datos logran mayor competitividad y capacidad de adaptación al mercado."),
    (&["16949", "automotriz"], "ISO 16949 establece requisitos específicos de calidad para la industria automotriz, mejorando la confiabilidad de productos y procesos. Su implementación reduce defectos, optimiza la cadena de suministro y facilita el acceso a mercados automotrices globales. Las empresas certificadas demuestran capacidad de cumplir estándares exigentes y mantener relaciones sólidas con fabricantes automotrices."),
    (&["30401", "conocimiento"], "ISO 30401 optimiza la gestión del conocimiento organizacional, capturando y compartiendo experiencias valiosas para la innovación. Su implementación acelera el aprendizaje, reduce la pérdida de conocimiento crítico y mejora la capacidad de adaptación. Las organizaciones inteligentes retienen talento, aceleran la innovación y mantienen ventajas competitivas sostenibles."),
    (&["13485", "médicos", "dispositivos"], "ISO 13485 asegura la calidad y seguridad de dispositivos médicos mediante sistemas de gestión especializados. Su implementación facilita el acceso a mercados regulados, mejora la confianza de profesionales de salud y garantiza cumplimiento normativo estricto. Las empresas certificadas demuestran compromiso con la salud pública y excelencia en tecnología médica."),
    (&["cultura organizacional", "liderazgo"], "El desarrollo de cultura organizacional alineada con normas ISO fortalece el liderazgo, compromiso de empleados y resultados empresariales. Su implementación mejora el clima laboral, aumenta la productividad y facilita la adopción de mejores prácticas. Las organizaciones con cultura sólida retienen talento, innovan continuamente y logran sostenibilidad a largo plazo."),
    (&["28000", "cadena de suministro"], "ISO 28000 protege la cadena de suministro global mediante sistemas de gestión de seguridad que mitigan riesgos operativos. Su implementación mejora la trazabilidad, reduce vulnerabilidades y fortalece la confianza de socios comerciales. Las empresas certificadas acceden a mercados internacionales y demuestran capacidad de gestionar operaciones seguras y eficientes."),
];

const GENERIC_SUMMARY: &str = "Esta implementación normativa fortalece los sistemas de gestión organizacional, mejorando la eficiencia operativa y el cumplimiento de estándares internacionales. Su adopción genera ventajas competitivas sostenibles, optimiza procesos críticos y demuestra compromiso con la excelencia empresarial. Las organizaciones implementadoras experimentan mayor productividad, reducción de costos y mejor posicionamiento en mercados exigentes.";

/// Where a summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryOrigin {
    Ai,
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub origin: SummaryOrigin,
}

/// Subject area for the ISO standard named in `title`.
pub fn iso_context(title: &str) -> &'static str {
    ISO_NUMBER
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|number| {
            ISO_CONTEXTS
                .iter()
                .find(|(code, _)| *code == number.as_str())
                .map(|(_, context)| *context)
        })
        .unwrap_or(DEFAULT_CONTEXT)
}

/// Focus of the summary, chosen from the title's keywords.
pub fn summary_angle(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    ANGLES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, angle)| *angle)
        .unwrap_or(DEFAULT_ANGLE)
}

/// Prompt for the `index`-th (0-based) article.
pub fn build_prompt(title: &str, index: usize) -> String {
    let number = index + 1;
    let context = iso_context(title);
    let angle = summary_angle(title);
    format!(
        "Eres un consultor senior especializado en {context}. Analiza el título del artículo #{number} \
y redacta un resumen ÚNICO y específico de 2-3 oraciones.\n\n\
TÍTULO: \"{title}\"\n\n\
ARTÍCULO #{number} - INSTRUCCIONES:\n\
1. Identifica qué problema empresarial concreto resuelve\n\
2. Menciona beneficios cuantificables o resultados medibles\n\
3. Indica el sector o tipo de organización que más se beneficia\n\
4. Usa terminología técnica de {context}\n\
5. Evita frases genéricas como \"mejora la eficiencia\"\n\
6. Céntrate en {angle}\n\n\
FORMATO: 2-3 oraciones profesionales, sin empezar con \"Este artículo\" ni similares."
    )
}

/// Keyword-indexed canned summary for `title`.
pub fn template_summary(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    TEMPLATES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, text)| *text)
        .unwrap_or(GENERIC_SUMMARY)
}

/// Produces summaries, through the LLM when one is configured.
pub struct Summarizer<A> {
    client: Option<A>,
}

impl<A> Summarizer<A>
where
    A: AskAsync<Response = String>,
{
    pub fn new(client: Option<A>) -> Self {
        Self { client }
    }

    pub fn uses_ai(&self) -> bool {
        self.client.is_some()
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn summarize(&self, title: &str, index: usize) -> Summary {
        let template = || Summary {
            text: template_summary(title).to_string(),
            origin: SummaryOrigin::Template,
        };

        let Some(client) = &self.client else {
            return template();
        };

        match client.ask(&build_prompt(title, index)).await {
            Ok(text) if !text.trim().is_empty() => Summary {
                text: text.trim().to_string(),
                origin: SummaryOrigin::Ai,
            },
            Ok(_) => {
                warn!(index, "LLM returned an empty summary; using template");
                template()
            }
            Err(e) => {
                warn!(index, error = %e, "LLM summary failed; using template");
                template()
            }
        }
    }

    /// Summarize and categorize every stub in order, pausing `pause` between
    /// consecutive LLM requests.
    #[instrument(level = "info", skip_all, fields(count = stubs.len(), source = source.as_str()))]
    pub async fn enrich(
        &self,
        stubs: Vec<ArticleStub>,
        source: DataSource,
        pause: Duration,
    ) -> Vec<ProcessedArticle> {
        let total = stubs.len();
        let articles: Vec<ProcessedArticle> = stream::iter(stubs.into_iter().enumerate())
            .then(|(i, stub)| async move {
                if i > 0 && self.uses_ai() && !pause.is_zero() {
                    sleep(pause).await;
                }

                let summary = self.summarize(&stub.title, i).await;
                let category = categorize(&stub.title);
                debug!(
                    index = i,
                    total,
                    category,
                    summary = %truncate_for_log(&summary.text, 80),
                    "Processed article"
                );

                ProcessedArticle {
                    id: i + 1,
                    summary_length: summary.text.chars().count(),
                    ai_generated: summary.origin == SummaryOrigin::Ai,
                    ai_summary: summary.text,
                    category: category.to_string(),
                    title: stub.title,
                    url: stub.url,
                    image_url: stub.image_url,
                    post_code: stub.post_code,
                    page_found: stub.page_found,
                    extracted_at: stub.extracted_at,
                    processed_at: Utc::now(),
                    source,
                }
            })
            .collect()
            .await;

        let ai_count = articles.iter().filter(|a| a.ai_generated).count();
        info!(total, ai_count, "Finished summarizing articles");
        articles
    }
}
