use super::*;

#[test]
fn builtins_resolve_by_name_and_alias() {
    let registry = Registry::with_builtins();
    for key in ["Radare2", "radare2", "r2", "R2"] {
        let lexer = registry.get(key);
        assert!(
            lexer.is_some_and(|l| std::ptr::eq(l, crate::radare2())),
            "no built-in lexer for {key}"
        );
    }
}

#[test]
fn unknown_key_is_none() {
    let registry = Registry::with_builtins();
    assert!(registry.get("python").is_none());
    assert!(registry.info("").is_none());
}

#[test]
fn info_reports_metadata() {
    let registry = Registry::with_builtins();
    assert_eq!(registry.info("r2"), Some(RADARE2));
    assert_eq!(RADARE2.aliases, &["r2", "radare2"]);
    assert!(RADARE2.filenames.is_empty());
}

#[test]
fn later_registration_replaces_alias() {
    static OTHER: LexerInfo = LexerInfo {
        name: "Other",
        aliases: &["r2"],
        filenames: &[],
    };
    let mut registry = Registry::with_builtins();
    registry.register(OTHER, crate::radare2());
    assert_eq!(registry.info("r2").map(|i| i.name), Some("Other"));
    assert_eq!(registry.info("radare2").map(|i| i.name), Some("Radare2"));
    assert_eq!(registry.iter().count(), 2);
}
