use toml::Value;

const TABLE: &str = "src/romaji/default_table.toml";
const SETTINGS: &str = "src/default_settings.toml";

fn main() {
    println!("cargo:rerun-if-changed={TABLE}");
    println!("cargo:rerun-if-changed={SETTINGS}");

    let table = parse(TABLE, include_str!("src/romaji/default_table.toml"));
    check_table(&table);

    let settings = parse(SETTINGS, include_str!("src/default_settings.toml"));
    for section in ["scoring", "input", "survival", "time_attack"] {
        if !settings.get(section).is_some_and(Value::is_table) {
            panic!("{SETTINGS}: missing [{section}]");
        }
    }
}

fn parse(path: &str, content: &str) -> Value {
    content
        .parse::<Value>()
        .unwrap_or_else(|e| panic!("{path} contains invalid TOML: {e}"))
}

/// Every grapheme is one or two characters with a non-empty list of
/// non-empty spellings. Full validation happens again at load time.
fn check_table(table: &Value) {
    let Some(kana) = table.get("kana").and_then(Value::as_table) else {
        panic!("{TABLE}: missing [kana]");
    };
    for (grapheme, spellings) in kana {
        if !(1..=2).contains(&grapheme.chars().count()) {
            panic!("{TABLE}: grapheme {grapheme:?} must be one or two characters");
        }
        let ok = spellings.as_array().is_some_and(|list| {
            !list.is_empty()
                && list
                    .iter()
                    .all(|s| s.as_str().is_some_and(|s| !s.is_empty()))
        });
        if !ok {
            panic!("{TABLE}: {grapheme:?} needs a non-empty list of spellings");
        }
    }
}
