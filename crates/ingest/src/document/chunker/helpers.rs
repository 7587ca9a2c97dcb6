//! Text splitting and merging utilities used by the chunking strategies.

use std::collections::VecDeque;

use super::types::ChunkConfig;

/// Length in Unicode scalar values.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split `text` on `separator`, dropping empty fragments. The empty
/// separator yields one fragment per character.
pub(crate) fn split_on_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        text.chars().map(String::from).collect()
    } else {
        text.split(separator)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Split `text` into pieces of at most `config.chunk_size` characters.
///
/// Picks the first separator in `separators` that occurs in `text`. Fragments
/// that still exceed the chunk size are split again with the remaining, finer
/// separators; fragments that fit are merged back together with overlap.
pub(crate) fn split_recursive(text: &str, separators: &[String], config: &ChunkConfig) -> Vec<String> {
    let mut separator = separators.last().map(String::as_str).unwrap_or("");
    let mut finer: &[String] = &[];
    for (i, sep) in separators.iter().enumerate() {
        if sep.is_empty() {
            separator = sep.as_str();
            finer = &[];
            break;
        }
        if text.contains(sep.as_str()) {
            separator = sep.as_str();
            finer = &separators[i + 1..];
            break;
        }
    }

    let mut output = Vec::new();
    let mut fitting: Vec<String> = Vec::new();

    for fragment in split_on_separator(text, separator) {
        if char_len(&fragment) < config.chunk_size {
            fitting.push(fragment);
            continue;
        }
        if !fitting.is_empty() {
            output.extend(merge_splits(&fitting, separator, config));
            fitting.clear();
        }
        if finer.is_empty() {
            output.push(fragment);
        } else {
            output.extend(split_recursive(&fragment, finer, config));
        }
    }
    if !fitting.is_empty() {
        output.extend(merge_splits(&fitting, separator, config));
    }
    output
}

/// Greedily join `fragments` with `separator` into chunks no longer than the
/// chunk size. After each emitted chunk, fragments are dropped from the front
/// until at most `chunk_overlap` characters remain; those carry into the next
/// chunk.
pub(crate) fn merge_splits(fragments: &[String], separator: &str, config: &ChunkConfig) -> Vec<String> {
    let sep_len = char_len(separator);
    let mut chunks = Vec::new();
    let mut current: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for fragment in fragments {
        let len = char_len(fragment);
        let joiner = if current.is_empty() { 0 } else { sep_len };

        if total + len + joiner > config.chunk_size && !current.is_empty() {
            if let Some(chunk) = join_trimmed(&current, separator) {
                chunks.push(chunk);
            }
            loop {
                let joiner = if current.is_empty() { 0 } else { sep_len };
                let must_shrink = total > config.chunk_overlap
                    || (total > 0 && total + len + joiner > config.chunk_size);
                if !must_shrink {
                    break;
                }
                let Some(first) = current.pop_front() else {
                    break;
                };
                let dropped_joiner = if current.is_empty() { 0 } else { sep_len };
                total -= char_len(first) + dropped_joiner;
            }
        }

        current.push_back(fragment);
        total += len + if current.len() > 1 { sep_len } else { 0 };
    }

    if let Some(chunk) = join_trimmed(&current, separator) {
        chunks.push(chunk);
    }
    chunks
}

fn join_trimmed(parts: &VecDeque<&str>, separator: &str) -> Option<String> {
    let joined = parts.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
