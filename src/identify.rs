use crate::model::{Document, ParagraphFunction};

const PREFIX_CHARS: usize = 50;

pub fn describe(function: ParagraphFunction) -> &'static str {
    use ParagraphFunction::*;
    match function {
        Objective => "Este trecho descreve o objetivo do estudo",
        Results => "Este trecho resume os resultados do estudo",
        Conclusion => "Este trecho apresenta conclusão",
        Summary => "Este trecho resume o estudo",
        Context => "Este trecho apresenta contexto e informações de base",
        Gap => "Este trecho aponta uma lacuna na literatura",
        Problem => "Este trecho identifica um problema ou lacuna",
        Participants => "Este trecho descreve os participantes",
        Intervention => "Este trecho descreve a intervenção aplicada",
        Measures => "Este trecho descreve os instrumentos de medida",
        Procedure => "Este trecho descreve o procedimento do estudo",
        Design => "Este trecho descreve o desenho do estudo",
        Sample => "Este trecho descreve características da amostra",
        MainFinding => "Este trecho apresenta resultado principal",
        SecondaryFinding => "Este trecho apresenta resultado secundário",
        NullFinding => "Este trecho reporta resultado não significativo",
        Finding => "Este trecho apresenta um resultado",
        Limitations => "Este trecho discute limitações do estudo",
        FutureDirections => "Este trecho sugere direções futuras",
        Interpretation => "Este trecho interpreta os resultados",
        Comparison => "Este trecho compara achados com literatura",
        General => "Este trecho faz parte do texto do artigo",
    }
}

/// Why a paragraph with this function matters to the reader.
pub fn explain(function: ParagraphFunction) -> &'static str {
    use ParagraphFunction::*;
    match function {
        Objective => "Define o que o estudo pretende investigar ou responder. Essencial para entender a motivação da pesquisa.",
        Context => "Fornece informação de fundo necessária para compreender o problema. Pode ser pulado se você já conhece o tópico.",
        Problem => "Identifica o problema específico que motiva o estudo. Importante para entender relevância.",
        Gap => "Aponta o que ainda não foi estudado adequadamente. Justifica por que este estudo é necessário.",
        Design => "Explica como o estudo foi estruturado. Essencial para avaliar qualidade metodológica.",
        Participants => "Descreve quem participou do estudo. Importante para entender a quem os resultados se aplicam.",
        Intervention => "Detalha o que foi feito com os participantes. Central para entender o que está sendo testado.",
        Measures => "Lista os instrumentos usados para coletar dados. Técnico, pode ser pulado em primeira leitura.",
        Sample => "Descreve características dos participantes. Ajuda avaliar representatividade.",
        MainFinding => "Apresenta o resultado mais importante. Essencial, não pule.",
        SecondaryFinding => "Apresenta resultados adicionais. Importante mas não central.",
        NullFinding => "Reporta onde não houve diferença significativa. Importante para entender limites.",
        Interpretation => "Explica o que os resultados significam. Essencial para compreensão.",
        Comparison => "Relaciona achados com outros estudos. Contextualiza os resultados.",
        Limitations => "Aponta problemas do estudo. Importante para avaliação crítica.",
        FutureDirections => "Sugere próximos passos. Pode ser pulado se não for sua área.",
        Conclusion => "Sintetiza principais achados. Essencial, sempre leia.",
        Results | Summary | Procedure | Finding | General => {
            "Função do trecho no contexto do artigo."
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identification {
    Found {
        paragraph_id: String,
        section_title: String,
        function: ParagraphFunction,
        description: &'static str,
        explanation: &'static str,
    },
    Unknown,
    EmptySelection,
}

/// Find the paragraph a selection was taken from.
///
/// A paragraph matches when it contains the selection, or when the selection
/// contains the paragraph's first 50 characters (a selection spanning more
/// than one paragraph). First match in reading order wins.
pub fn identify_function(document: &Document, selection: &str) -> Identification {
    let needle = selection.trim().to_lowercase();
    if needle.is_empty() {
        return Identification::EmptySelection;
    }

    document
        .paragraphs()
        .find(|(_, p)| {
            let text = p.text.to_lowercase();
            let prefix: String = text.chars().take(PREFIX_CHARS).collect();
            text.contains(&needle) || needle.contains(&prefix)
        })
        .map(|(section, p)| Identification::Found {
            paragraph_id: p.id.clone(),
            section_title: section.title.clone(),
            function: p.function,
            description: describe(p.function),
            explanation: explain(p.function),
        })
        .unwrap_or(Identification::Unknown)
}
