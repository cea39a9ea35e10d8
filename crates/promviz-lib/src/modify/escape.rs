/// Escapes a value placed inside a quoted regex matcher.
pub fn prometheus_regular_escape(value: &str) -> String {
    value.replace('\\', r"\\").replace('\'', r"\\'")
}

/// Escapes a template variable value so that it matches literally inside a regex.
pub fn prometheus_special_regex_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str(r"\\\\"),
            '$' | '^' | '*' | '{' | '}' | '[' | ']' | '\'' | '+' | '?' | '.' | '(' | ')' | '|' => {
                out.push_str(r"\\");
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
