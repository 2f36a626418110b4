//! Static institutional copy and prompt templates. The chat front end
//! renders HTML, so the canned replies keep their markup.

/// Terminal reply when no stage produced an answer. This stage never
/// fails.
pub const DEFAULT_REPLY: &str = "\
🏛️ <strong>Consulta Institucional Oficial</strong><br><br>\
📌 A informação solicitada não foi localizada na base institucional oficial.<br><br>\
🌐 https://www.uesc.br/<br>\
🎓 https://colcic.uesc.br/<br>\
📧 colcic@uesc.br<br>\
📞 (73) 3680-5110";

/// Body of the generic 500-class response.
pub const SERVER_ERROR_REPLY: &str =
    "⚠️ Ocorreu uma instabilidade na comunicação com o servidor institucional.";

/// Static reply when the link/URL stage finds nothing on the official
/// domains.
pub const WEB_DEFAULT_REPLY: &str = "\
🌐 Não localizei a página solicitada nos portais oficiais. \
Os endereços institucionais são:<br>\
🌐 https://www.uesc.br/<br>\
🎓 https://colcic.uesc.br/";

/// Known static facts injected as priming context into the ungrounded
/// inference fallback.
pub const INSTITUTIONAL_FACTS: &str = "\
Universidade Estadual de Santa Cruz (UESC), Curso de Ciência da Computação.\n\
Colegiado do curso: COLCIC (https://colcic.uesc.br/).\n\
Portal institucional: https://www.uesc.br/.\n\
Contato do colegiado: colcic@uesc.br, telefone (73) 3680-5110.";

/// Prompt for the grounded (RAG) completion: answer strictly from the
/// retrieved context.
pub fn grounded_prompt(context: &str, question: &str) -> String {
    format!(
        "Você é um assistente institucional da UESC.\n\
         Responda exclusivamente com base no conteúdo abaixo.\n\n\
         {context}\n\n\
         Pergunta:\n{question}\n\n\
         Resposta institucional:\n"
    )
}

/// Prompt for the lexical-fallback summary over substring hits.
pub fn summary_prompt(context: &str, question: &str) -> String {
    format!(
        "Você é um assistente institucional da UESC.\n\
         Resuma o trecho institucional abaixo respondendo à pergunta do estudante.\n\n\
         {context}\n\n\
         Pergunta:\n{question}\n\n\
         Resposta institucional:\n"
    )
}

/// Prompt for the ungrounded fallback, primed with the static
/// institutional facts.
pub fn general_prompt(question: &str) -> String {
    format!(
        "Você é um assistente institucional da UESC.\n\
         Fatos institucionais conhecidos:\n{INSTITUTIONAL_FACTS}\n\n\
         Responda de forma breve e formal à pergunta:\n{question}\n"
    )
}
