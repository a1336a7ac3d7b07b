use parsing::Pqn;

fn segments(source: &str) -> Vec<String> {
    let pqn = Pqn::parse(source).unwrap();
    pqn.segments().iter().map(|segment| segment.to_string()).collect()
}

#[test]
fn most_specific_segment_first() {
    assert_eq!(segments("n4/format/DateTimeFormat:DateTimeFormat@withStyle"), [
        "withStyle",
        "@",
        "DateTimeFormat",
        "DateTimeFormat",
        "format",
        "n4"
    ]);
}

#[test]
fn fully_qualified() {
    let pqn = "stdlib_api:packages:eu.numberfour.stdlib.format.api:src/n4js/n4/format/StructuredText:StructuredText#asString";
    assert_eq!(segments(pqn), [
        "asString",
        "#",
        "StructuredText",
        "StructuredText",
        "format",
        "n4",
        "n4js",
        "src",
        "eu.numberfour.stdlib.format.api",
        "packages",
        "stdlib_api"
    ]);
}

#[test]
fn element_only() {
    assert_eq!(segments("DateTimeFormat"), ["DateTimeFormat"]);
    assert_eq!(segments("lang/IterableExt:first"), ["first", "IterableExt", "lang"]);
}

#[test]
fn accessor_marker_joins_delimiter() {
    assert_eq!(segments("Foo#<value"), ["value", "#<", "Foo"]);
    assert_eq!(segments("Foo@>value"), ["value", "@>", "Foo"]);
}

#[test]
fn quoted_segments_are_unquoted() {
    assert_eq!(segments(r##""Structuredö #^^Text"#asString"##), [
        "asString",
        "#",
        "Structuredö #^^Text"
    ]);
    assert_eq!(segments(r#""my:folder"/Mod:Elem"#), ["Elem", "Mod", "my:folder"]);
    assert_eq!(segments(r#"Type#"as \" x""#), [r#"as " x"#, "#", "Type"]);
}

#[test]
fn structural_tokens_are_ignored() {
    assert_eq!(segments("\t\nFoo#bar\n"), ["bar", "#", "Foo"]);
}

#[test]
fn empty_pqn() {
    assert!(Pqn::parse("").unwrap().is_empty());
    assert!(Pqn::parse("\n\t").unwrap().is_empty());
}

#[test]
fn number_is_rejected() {
    let error = Pqn::parse("Foo:12").unwrap_err();
    insta::assert_snapshot!(error, @"1:5: Expected name or tab or newline or end of file, found number");
}

#[test]
fn unterminated_quote_is_rejected() {
    let error = Pqn::parse(r#"Foo#"bar"#).unwrap_err();
    assert_eq!(&*error.message, "Unterminated quoted name");
}
