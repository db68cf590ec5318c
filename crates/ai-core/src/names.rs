//! Display-name helpers for node and task types.

/// `a::b::SomeType<c::D>` -> `SomeType`.
pub fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// `MoveToTarget` -> `Move To Target`.
pub fn split_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(p) = prev {
            let next_lower = chars.peek().is_some_and(|n| n.is_lowercase());
            let boundary = (c.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit()))
                || (c.is_uppercase() && p.is_uppercase() && next_lower);
            if boundary && p != ' ' {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_strips_path_and_generics() {
        assert_eq!(short_type_name("ai_bt::nodes::Sequencer"), "Sequencer");
        assert_eq!(
            short_type_name("ai_task::ConditionList<my_game::World>"),
            "ConditionList"
        );
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn camel_case_is_split_into_words() {
        assert_eq!(split_camel_case("MoveToTarget"), "Move To Target");
        assert_eq!(split_camel_case("HTTPRequest"), "HTTP Request");
        assert_eq!(split_camel_case("Sequencer"), "Sequencer");
        assert_eq!(split_camel_case(""), "");
    }
}
