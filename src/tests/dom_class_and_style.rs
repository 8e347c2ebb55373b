use super::*;

fn first(dom: &Dom, selector: &str) -> Result<NodeId> {
    dom.query_selector(selector)?
        .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
}

#[test]
fn class_add_is_idempotent_and_remove_drops_empty_attribute() -> Result<()> {
    let mut dom = parse_html("<div id='c' class='glassCard'></div>")?;
    let card = first(&dom, "#c")?;

    dom.class_add(card, "is-lifted")?;
    dom.class_add(card, "is-lifted")?;
    assert_eq!(dom.attr(card, "class").as_deref(), Some("glassCard is-lifted"));

    dom.class_remove(card, "is-lifted")?;
    dom.class_remove(card, "glassCard")?;
    assert_eq!(dom.attr(card, "class"), None);
    Ok(())
}

#[test]
fn class_toggle_reports_new_presence() -> Result<()> {
    let mut dom = parse_html("<ul id='mobileNav'></ul>")?;
    let nav = first(&dom, "#mobileNav")?;
    assert!(dom.class_toggle(nav, "open")?);
    assert!(dom.class_contains(nav, "open")?);
    assert!(!dom.class_toggle(nav, "open")?);
    assert!(!dom.class_contains(nav, "open")?);
    Ok(())
}

#[test]
fn style_set_overwrites_in_place_and_keeps_other_declarations() -> Result<()> {
    let mut dom = parse_html("<div id='c' style='color: red; transform: none'></div>")?;
    let card = first(&dom, "#c")?;

    dom.style_set(card, "transform", "translateY(-4px)")?;
    dom.style_set(card, "transform", "translateY(0)")?;
    assert_eq!(
        dom.attr(card, "style").as_deref(),
        Some("color: red; transform: translateY(0);")
    );
    assert_eq!(dom.style_get(card, "transform")?, "translateY(0)");
    Ok(())
}

#[test]
fn style_accepts_camel_case_property_names() -> Result<()> {
    let mut dom = parse_html("<input id='age'>")?;
    let input = first(&dom, "#age")?;
    dom.style_set(input, "boxShadow", "0 0 0 2px rgba(37,99,235,0.25)")?;
    assert_eq!(
        dom.style_get(input, "box-shadow")?,
        "0 0 0 2px rgba(37,99,235,0.25)"
    );
    Ok(())
}

#[test]
fn empty_style_value_removes_the_declaration_and_attribute() -> Result<()> {
    let mut dom = parse_html("<div id='c' style='transform: scale(1)'></div>")?;
    let card = first(&dom, "#c")?;
    dom.style_set(card, "transform", "")?;
    assert_eq!(dom.attr(card, "style"), None);
    assert_eq!(dom.style_get(card, "transform")?, "");
    Ok(())
}

#[test]
fn class_and_style_reject_non_element_targets() -> Result<()> {
    let mut dom = parse_html("<p id='p'>text</p>")?;
    let root = dom.root;
    assert!(matches!(dom.class_add(root, "x"), Err(Error::Runtime(_))));
    assert!(matches!(dom.style_get(root, "color"), Err(Error::Runtime(_))));
    assert!(matches!(
        dom.class_contains(NodeId(999), "x"),
        Err(Error::Runtime(_))
    ));
    Ok(())
}

#[test]
fn snippets_truncate_long_markup() {
    assert_eq!(dom::truncate_chars("abcdef", 3), "abc...");
    assert_eq!(dom::truncate_chars("abc", 3), "abc");
}
