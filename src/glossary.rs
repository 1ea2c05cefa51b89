use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Term {
    pub term: &'static str,
    pub definition: &'static str,
    /// What the term does in the study being read.
    pub context: &'static str,
}

const fn term(term: &'static str, definition: &'static str, context: &'static str) -> Term {
    Term {
        term,
        definition,
        context,
    }
}

pub static TERMS: &[Term] = &[
    term(
        "TDAH",
        "Transtorno de Déficit de Atenção e Hiperatividade. Condição neurodesenvolvimental caracterizada por padrões persistentes de desatenção, hiperatividade e impulsividade.",
        "Neste estudo, refere-se à condição clínica dos participantes avaliados na intervenção.",
    ),
    term(
        "TCC",
        "Terapia Cognitivo-Comportamental. Forma de psicoterapia que foca em modificar padrões de pensamento e comportamento disfuncionais.",
        "Neste estudo, é a intervenção aplicada ao grupo experimental durante 12 semanas.",
    ),
    term(
        "RCT",
        "Randomized Controlled Trial (Estudo Randomizado Controlado). Desenho experimental onde participantes são aleatoriamente alocados em grupos.",
        "Método utilizado para garantir validade científica dos resultados comparando grupo experimental e controle.",
    ),
    term(
        "funções executivas",
        "Processos cognitivos que controlam e regulam comportamento dirigido a objetivos. Incluem planejamento, memória de trabalho, inibição e flexibilidade cognitiva.",
        "Uma das principais variáveis medidas no estudo através do instrumento BRIEF-A.",
    ),
    term(
        "DSM-5",
        "Manual Diagnóstico e Estatístico de Transtornos Mentais, 5ª edição. Sistema de classificação diagnóstica da Associação Americana de Psiquiatria.",
        "Critério utilizado para confirmar diagnóstico de TDAH nos participantes do estudo.",
    ),
    term(
        "ASRS",
        "Adult ADHD Self-Report Scale. Escala de autorrelato com 18 itens para avaliar sintomas de TDAH em adultos.",
        "Medida primária utilizada para avaliar sintomas de desatenção e hiperatividade.",
    ),
    term(
        "BRIEF-A",
        "Behavior Rating Inventory of Executive Function - Adult Version. Questionário de 75 itens que avalia funções executivas em adultos.",
        "Instrumento usado para medir mudanças em inibição, memória de trabalho e planejamento.",
    ),
    term(
        "DERS",
        "Difficulties in Emotion Regulation Scale. Escala que avalia dificuldades na regulação emocional através de múltiplas dimensões.",
        "Medida utilizada para avaliar regulação emocional, incluindo clareza emocional e controle de impulsos.",
    ),
    term(
        "p<0.001",
        "Valor de probabilidade menor que 0.001. Indica que a probabilidade dos resultados ocorrerem por acaso é menor que 0.1%.",
        "Demonstra significância estatística muito forte dos achados, especialmente para desatenção.",
    ),
    term(
        "η²",
        "Eta quadrado. Medida de tamanho de efeito que indica a proporção de variância explicada pelo tratamento. Valores: pequeno (0.01), médio (0.06), grande (0.14+).",
        "No estudo, η²=0.54 indica tamanho de efeito muito grande para redução de sintomas de desatenção.",
    ),
    term(
        "ANOVA",
        "Analysis of Variance (Análise de Variância). Teste estatístico que compara médias entre grupos para verificar se diferenças são significativas.",
        "ANOVA mista 2x2 foi usada para comparar mudanças entre grupo experimental e controle ao longo do tempo.",
    ),
    term(
        "metilfenidato",
        "Medicamento estimulante do sistema nervoso central, similar à anfetamina. Age aumentando disponibilidade de dopamina e noradrenalina.",
        "Mencionado como tratamento farmacológico de primeira linha para TDAH, ao qual 20-30% não respondem adequadamente.",
    ),
    term(
        "regulação emocional",
        "Capacidade de monitorar, avaliar e modificar reações emocionais para alcançar objetivos. Inclui identificação, compreensão e modulação de emoções.",
        "Variável que apresentou melhora significativa no grupo TCC, medida através do DERS.",
    ),
    term(
        "psicoeducação",
        "Processo educacional que fornece informação sobre diagnóstico, sintomas, tratamento e manejo de condição psicológica ou psiquiátrica.",
        "Componente inicial do protocolo TCC para aumentar compreensão dos participantes sobre TDAH.",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermLookup {
    Found(&'static Term),
    NotFound,
    EmptySelection,
}

/// Look a selection up in the glossary. The selection may contain a term
/// ("o TDAH em adultos") or be part of one ("BRIEF"); table order decides
/// between several candidates.
pub fn explain_term(selection: &str) -> TermLookup {
    let needle = selection.trim().to_lowercase();
    if needle.is_empty() {
        return TermLookup::EmptySelection;
    }

    TERMS
        .iter()
        .find(|t| {
            let term = t.term.to_lowercase();
            needle.contains(&term) || term.contains(&needle)
        })
        .map(TermLookup::Found)
        .unwrap_or(TermLookup::NotFound)
}
