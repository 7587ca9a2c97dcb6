use manualqa_index::ScoredChunk;
use manualqa_llm::Message;

/// Label for the `n`th context passage (1-based).
pub fn context_message(n: usize, content: &str) -> Message {
    Message::assistant(format!("Context {n}:\n{content}"))
}

/// System instruction, then one assistant message per retrieved chunk in
/// rank order, then the question.
pub fn build_messages(system_prompt: &str, contexts: &[ScoredChunk], question: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(contexts.len() + 2);
    messages.push(Message::system(system_prompt));
    messages.extend(
        contexts
            .iter()
            .enumerate()
            .map(|(i, hit)| context_message(i + 1, &hit.chunk.content)),
    );
    messages.push(Message::user(question));
    messages
}
