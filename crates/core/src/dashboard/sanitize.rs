//! Plain-text field sanitization.
//!
//! Steps, in order:
//! 1. A `<` that never reaches a `>` before the next `<` (or the end) is
//!    HTML-escaped together with the text it spans.
//! 2. `<script>` and `<style>` elements are dropped with their contents,
//!    then every remaining tag is dropped.
//! 3. Runs of CR, LF, tab and space collapse to one space; other control
//!    characters are removed.
//! 4. Percent-encoded octets (`%XX`) are removed until none remain.
//! 5. The result is trimmed.

/// Sanitizes a single-line text field.
#[must_use]
pub fn sanitize_text_field(input: &str) -> String {
    let mut filtered = if input.contains('<') {
        strip_all_tags(&escape_unclosed_lt(input))
    } else {
        input.to_string()
    };

    filtered = collapse_whitespace(&filtered).trim().to_string();

    let (without_octets, found) = strip_percent_octets(&filtered);
    if found {
        filtered = collapse_spaces(&without_octets).trim().to_string();
    }

    filtered
}

/// Escapes each `<...` run that is not closed by `>` before the next `<`.
fn escape_unclosed_lt(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match tail[1..].find(['<', '>']) {
            Some(pos) if tail.as_bytes()[pos + 1] == b'>' => {
                out.push_str(&tail[..pos + 2]);
                rest = &tail[pos + 2..];
            }
            Some(pos) => {
                out.push_str(&escape_html(&tail[..=pos]));
                rest = &tail[pos + 1..];
            }
            None => {
                out.push_str(&escape_html(tail));
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

fn strip_all_tags(input: &str) -> String {
    strip_tags(&remove_script_and_style(input))
}

/// Drops `<script ...>...</script>` and `<style ...>...</style>` elements.
/// An opening tag without a matching close is left for `strip_tags`.
fn remove_script_and_style(input: &str) -> String {
    let mut out = input.to_string();
    let mut from = 0;

    loop {
        // ASCII lowercasing keeps byte offsets aligned with `out`.
        let lower = out.to_ascii_lowercase();
        let Some((start, name)) = next_raw_element(&lower, from) else {
            break;
        };

        let after_name = start + 1 + name.len();
        let closing = format!("</{name}>");
        let element_end = lower[after_name..].find('>').and_then(|gt| {
            let body_start = after_name + gt + 1;
            lower[body_start..]
                .find(&closing)
                .map(|close| body_start + close + closing.len())
        });

        match element_end {
            Some(end) => {
                out.replace_range(start..end, "");
                from = start;
            }
            None => from = start + 1,
        }
    }

    out
}

fn next_raw_element(lower: &str, from: usize) -> Option<(usize, &'static str)> {
    ["script", "style"]
        .into_iter()
        .filter_map(|name| {
            lower[from..]
                .find(&format!("<{name}"))
                .map(|pos| (from + pos, name))
        })
        .min_by_key(|(pos, _)| *pos)
}

/// Removes tags. A `<` followed by a blank is kept as literal text.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }

        if chars.peek().is_some_and(|next| is_blank(*next)) {
            out.push(c);
            continue;
        }

        for skipped in chars.by_ref() {
            if skipped == '>' {
                break;
            }
        }
    }

    out
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn collapse_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.chars() {
        if is_blank(c) {
            pending_space = true;
            continue;
        }
        // other control characters vanish without ending a blank run
        if c.is_control() {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }

    if pending_space {
        out.push(' ');
    }

    out
}

fn collapse_spaces(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_space = false;

    for c in input.chars() {
        if c == ' ' {
            if !previous_space {
                out.push(c);
            }
            previous_space = true;
        } else {
            out.push(c);
            previous_space = false;
        }
    }

    out
}

/// Removes `%XX` octets repeatedly. Returns whether any were found.
fn strip_percent_octets(input: &str) -> (String, bool) {
    let mut out = input.to_string();
    let mut found = false;

    while let Some(octet) = find_octet(&out) {
        out = out.replace(&octet, "");
        found = true;
    }

    (out, found)
}

fn find_octet(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    bytes.windows(3).find_map(|w| {
        (w[0] == b'%' && w[1].is_ascii_hexdigit() && w[2].is_ascii_hexdigit())
            .then(|| String::from_utf8_lossy(w).into_owned())
    })
}
