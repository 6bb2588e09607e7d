//! Prompt templates sent to the answering service.

use crate::document::DocumentEntry;
use crate::types::answer::QueryOutcome;

pub fn combined_prompt(
    question: &str,
    knowledge: &str,
    sources: &[String],
    reduced: bool,
) -> String {
    let count = sources.len();
    let note = if reduced {
        "NOTE: the knowledge base was condensed to its most relevant lines.\n"
    } else {
        ""
    };

    format!(
        "You are an assistant that has studied the following {count} documents:\n\
         REFERENCE DOCUMENTS: {sources}\n\
         \n\
         KNOWLEDGE BASE:\n\
         {knowledge}\n\
         \n\
         INSTRUCTIONS:\n\
         1. Answer using the knowledge from all {count} documents.\n\
         2. Cite the specific document (and section, where available) that supports each point.\n\
         3. Where documents differ or add to each other, say so.\n\
         4. If the information is not available, say so plainly.\n\
         {note}\n\
         QUESTION: {question}\n\
         \n\
         ANSWER WITH REFERENCES:\n",
        sources = sources.join(", "),
    )
}

pub fn document_prompt(question: &str, document: &DocumentEntry, sentinel: &str) -> String {
    let source = &document.source;
    format!(
        "Answer the question using ONLY the document below.\n\
         \n\
         DOCUMENT: {source}\n\
         CONTENT:\n\
         {content}\n\
         \n\
         INSTRUCTIONS:\n\
         1. Use only the content of {source}.\n\
         2. If it contains relevant information, answer in detail and cite the supporting section.\n\
         3. If it contains NO relevant information, reply with exactly \"{sentinel}\" and nothing else.\n\
         4. Start the answer with \"According to {source}, \".\n\
         \n\
         QUESTION: {question}\n\
         \n\
         ANSWER FROM {source}:\n",
        content = document.content,
    )
}

pub fn synthesis_prompt(question: &str, outcomes: &[QueryOutcome]) -> String {
    let mut prompt = format!(
        "Below are answers to the same question, each taken from a different document.\n\
         \n\
         QUESTION: {question}\n\
         \n\
         ANSWERS BY DOCUMENT:\n"
    );

    for (i, outcome) in outcomes.iter().enumerate() {
        prompt.push_str(&format!(
            "\n{}. FROM {}:\n{}\n",
            i + 1,
            outcome.source_name,
            outcome.answer_text
        ));
    }

    let sources = source_list(outcomes);
    prompt.push_str(&format!(
        "\nSYNTHESIS INSTRUCTIONS:\n\
         1. Combine the information from all {count} documents above into one answer.\n\
         2. Name every supporting document: {sources}.\n\
         3. Where the documents differ, explain how.\n\
         4. Open with \"Based on {sources}, \".\n\
         \n\
         INTEGRATED ANSWER:\n",
        count = outcomes.len(),
    ));
    prompt
}

/// Source-labelled concatenation used when the synthesis call fails.
pub fn concatenate_answers(outcomes: &[QueryOutcome]) -> String {
    let mut combined = format!(
        "Based on {} documents ({}):\n\n",
        outcomes.len(),
        source_list(outcomes)
    );
    for outcome in outcomes {
        combined.push_str(&format!("[{}]\n{}\n\n", outcome.source_name, outcome.answer_text));
    }
    combined.trim_end().to_string()
}

fn source_list(outcomes: &[QueryOutcome]) -> String {
    outcomes
        .iter()
        .map(|o| o.source_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
