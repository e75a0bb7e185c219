//! Line tokenizer
//!
//! A token is either a quoted run (one or more identical quote characters,
//! anything up to the next run of the same character and length) or a run of
//! non-whitespace. Quotes stay in the raw token and are stripped by
//! [`unquote`].

/// Characters that open a quoted token
pub const QUOTES: [char; 2] = ['"', '`'];

/// Split a line into raw tokens
pub fn tokenize(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if chars[pos].is_whitespace() {
            pos += 1;
            continue;
        }

        let end = quoted_end(&chars, pos).unwrap_or_else(|| word_end(&chars, pos));
        tokens.push(chars[pos..end].iter().collect());
        pos = end;
    }

    tokens
}

/// Strip the enclosing quote runs of a raw token
pub fn unquote(token: &str) -> &str {
    let Some(quote) = token.chars().next().filter(|c| QUOTES.contains(c)) else {
        return token;
    };

    let lead = token.chars().take_while(|&c| c == quote).count();
    let trail = token.chars().rev().take_while(|&c| c == quote).count();
    let width = lead.min(trail).min(token.chars().count() / 2);

    // Quote characters are single byte
    &token[width..token.len() - width]
}

/// End of a quoted token starting at `start`, if it is closed
fn quoted_end(chars: &[char], start: usize) -> Option<usize> {
    let quote = chars[start];
    if !QUOTES.contains(&quote) {
        return None;
    }

    let run = chars[start..].iter().take_while(|&&c| c == quote).count();
    let mut pos = start + run;

    while pos < chars.len() {
        if chars[pos] == quote {
            let closing = chars[pos..].iter().take_while(|&&c| c == quote).count();
            if closing >= run {
                return Some(pos + run);
            }
            pos += closing;
        } else {
            pos += 1;
        }
    }

    None
}

fn word_end(chars: &[char], start: usize) -> usize {
    chars[start..]
        .iter()
        .position(|c| c.is_whitespace())
        .map_or(chars.len(), |offset| start + offset)
}
