//! Stores Unicode escapes of narrow literals in a legacy code page.
//!
//! Run with `--features encoding`.

use c_unquote::{Unquoter, transcode::CodePage};

fn main() {
    let source = br#""\u3042\u3044\u3046 = aiu""#;

    for label in ["utf-8", "shift_jis", "euc-jp", "windows-1252"] {
        let page = CodePage::for_label(label.as_bytes()).unwrap();
        let mut unquoter = Unquoter::with_transcoder(page);
        let bytes = unquoter.unquote(source);

        let (text, _, _) = page.encoding().decode(&bytes);
        println!("{:<14} {:02X?} -> {}", page.encoding().name(), bytes, text);
    }
}
