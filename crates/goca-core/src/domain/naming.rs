// ============================================================================
// Identifier Case Conversion Helpers
// ============================================================================

//! Pure identifier transformations.
//!
//! Generated file names and identifiers are always re-derived from a single
//! canonical name through these functions. They take one string, return one
//! string, and know nothing about the configuration model.

/// Split a string into lowercase words based on casing and separators.
///
/// ## Word Boundary Detection
///
/// 1. **Explicit separators:** `_`, `-`, `.`, whitespace → always split
/// 2. **Case transition (camelCase):** `aB` → split between `a` and `B`
/// 3. **Acronym boundary:** `HTTPRequest` → split between `P` and `R`
///    (detected by `Upper Upper Lower` pattern)
/// 4. **Digit to upper:** `Order2Item` → `order2` + `item`
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            // "myApp" → "my" + "App", "v2Api" → "v2" + "Api"
            if (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // "HTTPServer" → "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// `order item` → `OrderItem`
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// `OrderItem` → `orderItem`
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
        .collect()
}

/// `OrderItem` → `order_item`
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// `OrderItem` → `order-item`
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// `OrderItem` → `ORDER_ITEM`
pub fn to_upper_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// `OrderItem` → `orderitem` (Go package style)
pub fn to_lower_case(s: &str) -> String {
    split_words(s).concat()
}

/// Naive English pluralization of the last word, preserving its casing.
///
/// Good enough for table and route names; irregular nouns are not handled.
pub fn pluralize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let lower = s.to_lowercase();
    let ends_with_consonant_y = lower.ends_with('y')
        && !matches!(
            lower.chars().rev().nth(1),
            Some('a' | 'e' | 'i' | 'o' | 'u') | None
        );

    if ends_with_consonant_y {
        let stem = &s[..s.len() - 1];
        return format!("{stem}{}", if s.ends_with('Y') { "IES" } else { "ies" });
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| lower.ends_with(suffix)) {
        return format!("{s}{}", if is_shouting(s) { "ES" } else { "es" });
    }
    format!("{s}{}", if is_shouting(s) { "S" } else { "s" })
}

fn is_shouting(s: &str) -> bool {
    s.len() > 1 && s.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
}

/// Case- and separator-insensitive key used to compare logical names.
///
/// `OrderItem`, `order_item`, `ORDER-ITEM` all normalize to `orderitem`.
pub fn normalize(s: &str) -> String {
    to_lower_case(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_separators_and_case() {
        assert_eq!(split_words("my_awesome-app"), vec!["my", "awesome", "app"]);
        assert_eq!(split_words("myAwesomeApp"), vec!["my", "awesome", "app"]);
        assert_eq!(split_words("XMLHttpRequest"), vec!["xml", "http", "request"]);
        assert_eq!(split_words("  spaced   out "), vec!["spaced", "out"]);
    }

    #[test]
    fn case_conversions() {
        assert_eq!(to_pascal_case("order item"), "OrderItem");
        assert_eq!(to_camel_case("OrderItem"), "orderItem");
        assert_eq!(to_snake_case("OrderItem"), "order_item");
        assert_eq!(to_kebab_case("OrderItem"), "order-item");
        assert_eq!(to_upper_case("orderItem"), "ORDER_ITEM");
        assert_eq!(to_lower_case("Order_Item"), "orderitem");
    }

    #[test]
    fn acronyms_are_folded_into_words() {
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_pascal_case("http_server"), "HttpServer");
        assert_eq!(to_camel_case("UserID"), "userId");
    }

    #[test]
    fn single_word_and_empty_inputs() {
        assert_eq!(to_pascal_case("user"), "User");
        assert_eq!(to_camel_case("User"), "user");
        assert_eq!(to_snake_case(""), "");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn pluralization() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("USER"), "USERS");
    }

    #[test]
    fn normalize_ignores_case_and_separators() {
        assert_eq!(normalize("User"), normalize("USER"));
        assert_eq!(normalize("OrderItem"), normalize("order_item"));
        assert_eq!(normalize("order-item"), "orderitem");
    }
}
