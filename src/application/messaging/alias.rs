//! Alias expansion - fills `$N` and `$*` placeholders with arguments

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::domain::entities::Argument;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$([0-9]+|\*)$").expect("placeholder pattern is valid")
});

/// Expand an alias template into a new line.
///
/// `$N` becomes the raw value of the Nth argument and `$*` all of them; a
/// placeholder with nothing to substitute contributes no token at all.
pub fn expand(template: &str, args: &[Argument]) -> String {
    let mut pieces: Vec<String> = Vec::new();

    for piece in template.split_whitespace() {
        let Some(caps) = PLACEHOLDER.captures(piece) else {
            pieces.push(piece.to_string());
            continue;
        };

        match &caps[1] {
            "*" => {
                if !args.is_empty() {
                    pieces.push(args.iter().map(Argument::raw_value).collect::<Vec<_>>().join(" "));
                }
            }
            index => match index.parse::<usize>() {
                // $0 is not a placeholder
                Ok(0) => pieces.push(piece.to_string()),
                Ok(n) => {
                    if let Some(arg) = args.get(n - 1) {
                        pieces.push(arg.raw_value());
                    }
                }
                // Too large to index anything
                Err(_) => {}
            },
        }
    }

    pieces.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parser::{tokenize, unquote};

    fn args(tokens: &[&str]) -> Vec<Argument> {
        tokens.iter().map(|t| Argument::new(*t)).collect()
    }

    #[test]
    fn test_positional_placeholder() {
        assert_eq!(expand("greet $1", &args(&["world"])), "greet world");
        assert_eq!(expand("swap $2 $1", &args(&["a", "b"])), "swap b a");
    }

    #[test]
    fn test_missing_positional_is_dropped_cleanly() {
        assert_eq!(expand("greet $1 now", &args(&[])), "greet now");
        assert_eq!(expand("$3 greet $1", &args(&["x"])), "greet x");
    }

    #[test]
    fn test_star_placeholder() {
        assert_eq!(expand("y $*", &args(&["1", "2"])), "y 1 2");
        assert_eq!(expand("y $* end", &args(&[])), "y end");
    }

    #[test]
    fn test_star_requotes_whitespace() {
        assert_eq!(expand("say $*", &args(&["\"b c\"", "d"])), "say \"b c\" d");
        assert_eq!(expand("say $1", &args(&["\"b c\""])), "say \"b c\"");
    }

    #[test]
    fn test_empty_argument_keeps_its_position() {
        let line = expand("echo [ $1 ] $2", &args(&["\"\"", "tail"]));
        assert_eq!(line, "echo [ \"\" ] tail");

        let values: Vec<String> = tokenize(&line).iter().map(|t| unquote(t).to_string()).collect();
        assert_eq!(values, vec!["echo", "[", "", "]", "tail"]);
    }

    #[test]
    fn test_other_pieces_pass_through() {
        assert_eq!(expand("echo $x $0 $1a cost:$1", &args(&["v"])), "echo $x $0 $1a cost:$1");
        assert_eq!(expand("  spaced    out  ", &args(&[])), "spaced out");
    }

    #[test]
    fn test_huge_index_is_dropped() {
        assert_eq!(expand("a $99999999999999999999999 b", &args(&["x"])), "a b");
    }

    #[test]
    fn test_expansion_round_trips_values() {
        let original = args(&["one", "\"two words\"", "three"]);
        let line = expand("cmd $*", &original);

        let values: Vec<String> = tokenize(&line)
            .iter()
            .skip(1)
            .map(|t| unquote(t).to_string())
            .collect();
        let expected: Vec<&str> = original.iter().map(Argument::value).collect();
        assert_eq!(values, expected);
    }
}
