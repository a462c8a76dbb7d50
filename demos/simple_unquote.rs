//! Basic unquoting of narrow and wide literal source.

use c_unquote::{unquote16, unquote_str};

fn main() {
    let input = r#"  "Emoji: \U0001F600" " and a tab\t!"  "#;
    let expected = "Emoji: 😀 and a tab\t!";

    // `unquote_str` joins the literals, decodes escapes and validates UTF-8.
    let decoded = unquote_str(input).unwrap();
    assert_eq!(decoded, expected);
    println!("Unquoted string: {}", decoded);

    // The same source as UTF-16 decodes to UTF-16, surrogate pair included.
    let wide: Vec<u16> = input.encode_utf16().collect();
    let decoded = String::from_utf16(&unquote16(&wide)).unwrap();
    assert_eq!(decoded, expected);
    println!("Unquoted UTF-16: {}", decoded);
}
