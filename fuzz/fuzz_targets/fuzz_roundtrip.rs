#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use attrform::SelectionSet;
use libfuzzer_sys::fuzz_target;

/// Build a selection from fuzzer bytes: a handful of entries with short
/// id and value strings. Ids avoid characters XML attributes cannot carry
/// unescaped-equivalently; values take anything valid UTF-8 without
/// carriage returns (XML readers normalize line endings).
fn arbitrary_selection(u: &mut Unstructured<'_>) -> arbitrary::Result<SelectionSet> {
    let mut selection = SelectionSet::new();
    let entries = u.int_in_range(0..=4)?;
    for _ in 0..entries {
        let id = ascii_word(u)?;
        if id.is_empty() {
            continue;
        }
        let values = u.int_in_range(1..=3)?;
        for _ in 0..values {
            let value: String = String::arbitrary(u)?;
            let value: String = value.chars().filter(|c| *c != '\r').collect();
            selection.add_value(&id, value);
        }
    }
    Ok(selection)
}

fn ascii_word(u: &mut Unstructured<'_>) -> arbitrary::Result<String> {
    let len = u.int_in_range(0..=8)?;
    let mut word = String::new();
    for _ in 0..len {
        let c = u.int_in_range(b'a'..=b'z')?;
        word.push(c as char);
    }
    Ok(word)
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let selection = match arbitrary_selection(&mut u) {
        Ok(s) => s,
        Err(_) => return,
    };

    let encoded = attrform::serialize(&selection).expect("selections always encode");
    let decoded = attrform::parse(&encoded).expect("encoded selections always decode");
    assert_eq!(decoded, selection);
});
