/// Characters that can be matched by a literal transition.
pub(crate) fn is_operand(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

fn is_allowed(c: char) -> bool {
    is_operand(c) || matches!(c, '(' | ')' | '*' | '|')
}

/// Checks the surface syntax of an expression.
///
/// Only a handful of rules are enforced: the alphabet, no `**` and no `||`,
/// the first character must be an operand or `(`, and parentheses must
/// balance without the running depth ever dropping below zero. Inputs such
/// as `()` or `a|` pass, and are left for the builder to deal with.
pub fn is_valid(expression: impl AsRef<str>) -> bool {
    let expression = expression.as_ref();

    let Some(first) = expression.chars().next() else {
        return false;
    };
    if !is_operand(first) && first != '(' {
        return false;
    }

    let mut prev = None;
    let mut depth: usize = 0;
    for c in expression.chars() {
        if !is_allowed(c) {
            return false;
        }
        if matches!(c, '*' | '|') && prev == Some(c) {
            return false;
        }
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
        prev = Some(c);
    }

    depth == 0
}
