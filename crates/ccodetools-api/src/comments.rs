//! Doc-comment attachment by scanning source lines above a definition.
//!
//! Both backends use this scanner so they attach identical comments.

/// Return the comment directly above `start_line` (1-indexed), markers stripped.
///
/// Contiguous `//` lines are collected in source order. A block comment ends
/// the scan once its opening `/*` is reached. Blank lines are skipped; any
/// other line stops the scan.
pub fn doc_comment_before<S: AsRef<str>>(lines: &[S], start_line: usize) -> Option<String> {
    // Number of lines above the definition that are still unscanned
    let mut remaining = start_line.saturating_sub(1).min(lines.len());
    let mut pieces: Vec<String> = Vec::new();

    while remaining > 0 {
        let line = lines[remaining - 1].as_ref().trim();

        if line.starts_with("//") {
            pieces.push(line.trim_start_matches('/').trim().to_string());
            remaining -= 1;
        } else if line.starts_with("/*") || line.contains("*/") {
            pieces.push(collect_block(lines, remaining));
            break;
        } else if line.is_empty() {
            remaining -= 1;
        } else {
            break;
        }
    }

    if pieces.is_empty() {
        None
    } else {
        pieces.reverse();
        Some(pieces.join("\n"))
    }
}

/// Walk backward from line `end` (1-indexed) to the line opening the block
/// and flatten the block into one line of text
fn collect_block<S: AsRef<str>>(lines: &[S], end: usize) -> String {
    let mut block: Vec<&str> = Vec::new();
    let mut index = end;

    while index > 0 {
        let line = lines[index - 1].as_ref().trim();
        block.push(line);
        if line.starts_with("/*") {
            break;
        }
        index -= 1;
    }
    block.reverse();

    let text = block
        .join(" ")
        .replace("/*", "")
        .replace("*/", "")
        .replace('*', "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
