const MAX_HANDLE_CHARS: usize = 15;

/// Lower-cased handles addressed at the very start of `text`.
///
/// Only the leading run of `@handle` tokens counts; a mention after the first
/// ordinary word is part of the body and does not address the reply.
pub fn leading_mentions(text: &str) -> Vec<String> {
    let mut handles = Vec::new();
    let mut rest = text.trim_start();
    while let Some(after_at) = rest
        .strip_prefix('@')
        .or_else(|| rest.strip_prefix('\u{FF20}'))
    {
        let handle_len = after_at
            .char_indices()
            .find(|(_, ch)| !is_handle_char(*ch))
            .map(|(index, _)| index)
            .unwrap_or(after_at.len());
        let handle = &after_at[..handle_len];
        let next = after_at[handle_len..].chars().next();
        if handle.is_empty()
            || handle.chars().count() > MAX_HANDLE_CHARS
            || matches!(next, Some('@') | Some('\u{FF20}'))
        {
            break;
        }
        handles.push(handle.to_ascii_lowercase());
        rest = after_at[handle_len..].trim_start();
    }
    handles
}

fn is_handle_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
