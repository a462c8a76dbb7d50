//! Shows how to use the low-level token API for custom processing.

use c_unquote::token::{Escape, UnquotedToken, unquote};

fn main() {
    let raw = r#""Hello, \"world\"!\n" "Octal \101, hex \x42, \u00E9""#;
    println!("Source: {}", raw);

    // Describe every escape instead of decoding it.
    for token in unquote(raw.as_bytes()) {
        match token.unwrap() {
            UnquotedToken::Literal(bytes) => {
                println!("literal  {:?}", std::str::from_utf8(bytes).unwrap())
            }
            UnquotedToken::Escape(Escape::Octal(v)) => println!("octal    {:#o}", v),
            UnquotedToken::Escape(Escape::Hex(v)) => println!("hex      {:#x}", v),
            UnquotedToken::Escape(Escape::Unicode(v)) => println!("unicode  U+{:04X}", v),
            UnquotedToken::Escape(other) => println!("escape   {:?}", other),
        }
    }

    // Or decode into your own buffer.
    let mut out = Vec::new();
    for token in unquote(raw.as_bytes()) {
        token
            .unwrap()
            .store(&mut out, Some(&mut c_unquote::Utf8));
    }
    println!("Decoded: {}", String::from_utf8(out).unwrap());
}
