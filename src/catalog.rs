//! Literal text for recommendations and alerts
//!
//! Each recommendation category and alert type has one fixed entry per locale.
//! Nothing here is generated; entries are copied into fresh records per call.

use crate::config::Locale;
use crate::types::{AlertType, RecommendationCategory};

/// Fixed text of one recommendation
pub struct RecommendationText {
    pub title: &'static str,
    pub actions: &'static [&'static str],
    pub impact: &'static str,
}

pub fn recommendation_text(category: RecommendationCategory, locale: Locale) -> RecommendationText {
    match locale {
        Locale::PtBr => recommendation_text_pt_br(category),
        Locale::En => recommendation_text_en(category),
    }
}

pub fn alert_message(alert_type: AlertType, locale: Locale) -> &'static str {
    match (locale, alert_type) {
        (Locale::PtBr, AlertType::RiskElevation) => {
            "Score de risco elevado detectado. Considere consulta médica."
        }
        (Locale::PtBr, AlertType::CognitiveDecline) => {
            "Declínio cognitivo detectado nos últimos testes."
        }
        (Locale::PtBr, AlertType::SleepQuality) => "Qualidade do sono abaixo do recomendado.",
        (Locale::En, AlertType::RiskElevation) => {
            "Elevated risk score detected. Consider a medical consultation."
        }
        (Locale::En, AlertType::CognitiveDecline) => {
            "Cognitive decline detected in recent tests."
        }
        (Locale::En, AlertType::SleepQuality) => "Sleep quality below the recommended level.",
    }
}

fn recommendation_text_pt_br(category: RecommendationCategory) -> RecommendationText {
    match category {
        RecommendationCategory::Sleep => RecommendationText {
            title: "Melhorar Qualidade do Sono",
            actions: &[
                "Manter horário regular de dormir (antes das 22h)",
                "Evitar telas 1h antes de dormir",
                "Ambiente escuro e fresco (18-20°C)",
            ],
            impact: "Reduz inflamação cerebral e melhora consolidação de memória",
        },
        RecommendationCategory::Nutrition => RecommendationText {
            title: "Dieta Anti-Inflamatória",
            actions: &[
                "Aumentar ômega-3 (peixes, nozes)",
                "Reduzir açúcar e processados",
                "Adicionar cúrcuma e chá verde",
            ],
            impact: "Reduz marcadores inflamatórios sistêmicos",
        },
        RecommendationCategory::Cognitive => RecommendationText {
            title: "Estimulação Cognitiva Diária",
            actions: &[
                "Realizar 2-3 microtestes por dia no app",
                "Aprender algo novo (idioma, instrumento)",
                "Jogos de estratégia e quebra-cabeças",
            ],
            impact: "Estimula plasticidade neural e neuroproteção",
        },
        RecommendationCategory::Exercise => RecommendationText {
            title: "Aumentar Atividade Física",
            actions: &[
                "Meta: 7500 passos por dia",
                "30 min de exercício aeróbico 5x/semana",
                "Incluir treino de força 2x/semana",
            ],
            impact: "Melhora fluxo sanguíneo cerebral e reduz estresse oxidativo",
        },
        RecommendationCategory::Stress => RecommendationText {
            title: "Gerenciamento de Estresse",
            actions: &[
                "Meditação 10-15 min/dia",
                "Exercícios de respiração profunda",
                "Contato social regular",
            ],
            impact: "Reduz cortisol e inflamação sistêmica",
        },
    }
}

fn recommendation_text_en(category: RecommendationCategory) -> RecommendationText {
    match category {
        RecommendationCategory::Sleep => RecommendationText {
            title: "Improve Sleep Quality",
            actions: &[
                "Keep a regular bedtime (before 10pm)",
                "Avoid screens 1h before bed",
                "Dark, cool room (18-20°C)",
            ],
            impact: "Reduces brain inflammation and improves memory consolidation",
        },
        RecommendationCategory::Nutrition => RecommendationText {
            title: "Anti-Inflammatory Diet",
            actions: &[
                "Increase omega-3 (fish, nuts)",
                "Reduce sugar and processed foods",
                "Add turmeric and green tea",
            ],
            impact: "Reduces systemic inflammatory markers",
        },
        RecommendationCategory::Cognitive => RecommendationText {
            title: "Daily Cognitive Stimulation",
            actions: &[
                "Take 2-3 micro-tests per day in the app",
                "Learn something new (language, instrument)",
                "Strategy games and puzzles",
            ],
            impact: "Stimulates neural plasticity and neuroprotection",
        },
        RecommendationCategory::Exercise => RecommendationText {
            title: "Increase Physical Activity",
            actions: &[
                "Goal: 7500 steps per day",
                "30 min of aerobic exercise 5x/week",
                "Include strength training 2x/week",
            ],
            impact: "Improves cerebral blood flow and reduces oxidative stress",
        },
        RecommendationCategory::Stress => RecommendationText {
            title: "Stress Management",
            actions: &[
                "Meditation 10-15 min/day",
                "Deep breathing exercises",
                "Regular social contact",
            ],
            impact: "Reduces cortisol and systemic inflammation",
        },
    }
}
