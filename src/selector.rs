use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CompoundSelector {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrCondition>,
}

impl CompoundSelector {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && !self.universal
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
    }

    fn matches(&self, element: &dom::Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(id) = &self.id {
            if element.attrs.get("id") != Some(id) {
                return false;
            }
        }

        if !self
            .classes
            .iter()
            .all(|class_name| element.has_class(class_name))
        {
            return false;
        }

        self.attrs.iter().all(|cond| match cond {
            AttrCondition::Exists { key } => element.attrs.contains_key(key),
            AttrCondition::Eq { key, value } => element.attrs.get(key) == Some(value),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) compound: CompoundSelector,
    // Relation to the part on the left; `None` for the leftmost part.
    pub(crate) combinator: Option<Combinator>,
}

/// A comma-separated selector list, e.g. `.glassCard, .heroCard`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorList {
    groups: Vec<Vec<SelectorPart>>,
}

impl SelectorList {
    pub(crate) fn parse(selector: &str) -> Result<Self> {
        let groups = split_groups(selector)?
            .into_iter()
            .map(|group| parse_chain(selector, group))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { groups })
    }

    /// `Some(id)` for a bare `#id` selector, which resolves through the id index.
    pub(crate) fn id_only(&self) -> Option<&str> {
        let [group] = self.groups.as_slice() else {
            return None;
        };
        let [part] = group.as_slice() else {
            return None;
        };
        let compound = &part.compound;
        if compound.tag.is_none()
            && !compound.universal
            && compound.classes.is_empty()
            && compound.attrs.is_empty()
        {
            compound.id.as_deref()
        } else {
            None
        }
    }

    pub(crate) fn matches(&self, dom: &Dom, node_id: NodeId) -> bool {
        self.groups
            .iter()
            .any(|parts| matches_chain(dom, node_id, parts))
    }
}

fn matches_chain(dom: &Dom, node_id: NodeId, parts: &[SelectorPart]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return false;
    };
    if !matches_compound(dom, node_id, &last.compound) {
        return false;
    }
    let Some(combinator) = last.combinator else {
        return rest.is_empty();
    };

    match combinator {
        Combinator::Child => dom
            .parent(node_id)
            .is_some_and(|parent| matches_chain(dom, parent, rest)),
        Combinator::Descendant => {
            let mut cursor = dom.parent(node_id);
            while let Some(ancestor) = cursor {
                if matches_chain(dom, ancestor, rest) {
                    return true;
                }
                cursor = dom.parent(ancestor);
            }
            false
        }
        Combinator::AdjacentSibling => dom
            .previous_element_sibling(node_id)
            .is_some_and(|sibling| matches_chain(dom, sibling, rest)),
        Combinator::GeneralSibling => {
            let mut cursor = dom.previous_element_sibling(node_id);
            while let Some(sibling) = cursor {
                if matches_chain(dom, sibling, rest) {
                    return true;
                }
                cursor = dom.previous_element_sibling(sibling);
            }
            false
        }
    }
}

fn matches_compound(dom: &Dom, node_id: NodeId, compound: &CompoundSelector) -> bool {
    dom.element(node_id)
        .is_some_and(|element| compound.matches(element))
}

fn split_groups(selector: &str) -> Result<Vec<&str>> {
    let mut groups = Vec::new();
    let mut start = 0usize;
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    for (idx, ch) in selector.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' if bracket_depth > 0 => quote = Some(ch),
            '[' => bracket_depth += 1,
            ']' => {
                bracket_depth = bracket_depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
            }
            ',' if bracket_depth == 0 => {
                groups.push(non_empty_group(selector, &selector[start..idx])?);
                start = idx + 1;
            }
            _ => {}
        }
    }

    if bracket_depth != 0 || quote.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    groups.push(non_empty_group(selector, &selector[start..])?);
    Ok(groups)
}

fn non_empty_group<'a>(selector: &str, group: &'a str) -> Result<&'a str> {
    let group = group.trim();
    if group.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    Ok(group)
}

fn parse_chain(selector: &str, group: &str) -> Result<Vec<SelectorPart>> {
    let unsupported = || Error::UnsupportedSelector(selector.to_string());
    let mut parts: Vec<SelectorPart> = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in tokenize(group).map_err(|_| unsupported())? {
        let explicit = match token {
            ">" => Some(Combinator::Child),
            "+" => Some(Combinator::AdjacentSibling),
            "~" => Some(Combinator::GeneralSibling),
            _ => None,
        };
        if let Some(combinator) = explicit {
            if pending.is_some() || parts.is_empty() {
                return Err(unsupported());
            }
            pending = Some(combinator);
            continue;
        }

        let compound = parse_compound(token).ok_or_else(unsupported)?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(pending.take().unwrap_or(Combinator::Descendant))
        };
        parts.push(SelectorPart {
            compound,
            combinator,
        });
    }

    if parts.is_empty() || pending.is_some() {
        return Err(unsupported());
    }
    Ok(parts)
}

fn tokenize(group: &str) -> std::result::Result<Vec<&str>, ()> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    for (idx, ch) in group.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' if bracket_depth > 0 => quote = Some(ch),
            '[' => {
                bracket_depth += 1;
                start.get_or_insert(idx);
            }
            ']' => {
                bracket_depth = bracket_depth.checked_sub(1).ok_or(())?;
            }
            '>' | '+' | '~' if bracket_depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&group[s..idx]);
                }
                tokens.push(&group[idx..idx + 1]);
            }
            ch if ch.is_ascii_whitespace() && bracket_depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&group[s..idx]);
                }
            }
            _ => {
                start.get_or_insert(idx);
            }
        }
    }

    if bracket_depth != 0 || quote.is_some() {
        return Err(());
    }
    if let Some(s) = start {
        tokens.push(&group[s..]);
    }
    Ok(tokens)
}

fn parse_compound(token: &str) -> Option<CompoundSelector> {
    let bytes = token.as_bytes();
    let mut i = 0usize;
    let mut compound = CompoundSelector::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' if i == 0 => {
                compound.universal = true;
                i += 1;
            }
            b'#' => {
                let (id, next) = parse_ident(token, i + 1)?;
                if compound.id.replace(id).is_some() {
                    return None;
                }
                i = next;
            }
            b'.' => {
                let (class_name, next) = parse_ident(token, i + 1)?;
                compound.classes.push(class_name);
                i = next;
            }
            b'[' => {
                let (cond, next) = parse_attr_condition(token, i)?;
                compound.attrs.push(cond);
                i = next;
            }
            _ if i == 0 => {
                let (tag, next) = parse_ident(token, i)?;
                compound.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
            _ => return None,
        }
    }

    (!compound.is_empty()).then_some(compound)
}

fn parse_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let mut end = start;
    while end < bytes.len() && is_ident_char(bytes[end]) {
        end += 1;
    }
    if end == start {
        return None;
    }
    Some((src.get(start..end)?.to_string(), end))
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn parse_attr_condition(src: &str, open_bracket: usize) -> Option<(AttrCondition, usize)> {
    let close = find_attr_close(src, open_bracket)?;
    let body = src.get(open_bracket + 1..close)?.trim();
    if body.is_empty() {
        return None;
    }

    let cond = match body.split_once('=') {
        Some((key, value)) => {
            let key = key.trim().to_ascii_lowercase();
            if key.is_empty() || !key.bytes().all(is_ident_char) {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            AttrCondition::Eq {
                key,
                value: value.to_string(),
            }
        }
        None => {
            if !body.bytes().all(is_ident_char) {
                return None;
            }
            AttrCondition::Exists {
                key: body.to_ascii_lowercase(),
            }
        }
    };
    Some((cond, close + 1))
}

/// Index of the `]` closing the bracket at `open_bracket`, skipping quoted values.
fn find_attr_close(src: &str, open_bracket: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (offset, ch) in src.get(open_bracket + 1..)?.char_indices() {
        match (quote, ch) {
            (Some(q), _) if ch == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, ']') => return Some(open_bracket + 1 + offset),
            (None, _) => {}
        }
    }
    None
}
