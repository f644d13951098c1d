//! Static vocabularies used for completion

/// Document skeleton inserted by the `!` trigger
pub const BOILERPLATE_HTML: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head>
  <meta charset=\"UTF-8\">
  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
  <title>New Project</title>
</head>
<body>

</body>
</html>";

/// HTML comment skeleton inserted by the `<-` trigger
pub const COMMENT_SKELETON: &str = "<!--  -->";

/// Offset of the caret inside [`COMMENT_SKELETON`]
pub const COMMENT_CARET_OFFSET: usize = 5;

/// HTML tag names, in suggestion priority order
pub const HTML_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col",
    "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins",
    "kbd", "label", "legend", "li", "link", "main", "map", "mark", "menu", "meta", "meter",
    "nav", "noscript", "object", "ol", "optgroup", "option", "output", "p", "picture", "pre",
    "progress", "q", "rp", "rt", "ruby", "s", "samp", "script", "section", "select", "slot",
    "small", "source", "span", "strong", "style", "sub", "summary", "sup", "table", "tbody",
    "td", "template", "textarea", "tfoot", "th", "thead", "time", "title", "tr", "track", "u",
    "ul", "var", "video", "wbr",
];

/// HTML attribute names, in suggestion priority order
///
/// `aria-*` and `data-*` are wildcards: applying them inserts only the prefix.
pub const HTML_ATTRIBUTES: &[&str] = &[
    "id", "class", "src", "href", "alt", "title", "style", "type", "value", "name",
    "placeholder", "target", "rel", "width", "height", "required", "disabled", "checked",
    "autocomplete", "autofocus", "autoplay", "loop", "muted", "controls", "multiple",
    "action", "method", "enctype", "charset", "lang", "loading", "srcset", "sizes",
    "aria-*", "data-*", "allowfullscreen", "allow", "sandbox", "integrity", "crossorigin",
    "accept", "accesskey", "align", "async", "bgcolor", "border", "cite", "color",
    "cols", "colspan", "content", "contenteditable", "coords", "datetime", "default",
    "defer", "dir", "dirname", "download", "draggable", "dropzone", "form", "formaction",
    "headers", "hidden", "high", "hreflang", "http-equiv", "ismap", "kind", "label",
    "list", "low", "max", "maxlength", "media", "min", "novalidate", "open", "optimum",
    "pattern", "poster", "preload", "readonly", "reversed", "rows", "rowspan", "scope",
    "selected", "shape", "size", "span", "spellcheck", "srcdoc", "srclang", "start",
    "step", "tabindex", "translate", "usemap", "wrap",
];

/// Elements that never get a closing tag
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "img", "br", "hr", "input", "meta", "link", "wbr", "area", "base", "col", "embed",
    "param", "source", "track",
];

/// Attributes inserted without a value
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "disabled", "readonly", "checked", "required", "autofocus", "autoplay", "loop", "muted",
    "controls", "multiple", "reversed", "hidden", "async", "defer", "ismap", "open",
];

fn contains_ignore_case(list: &[&str], name: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(name))
}

/// Returns true if `name` is a void element
pub fn is_self_closing(name: &str) -> bool {
    contains_ignore_case(SELF_CLOSING_TAGS, name)
}

/// Returns true if `name` is a boolean attribute
pub fn is_boolean_attribute(name: &str) -> bool {
    contains_ignore_case(BOOLEAN_ATTRIBUTES, name)
}

/// Returns the insertable prefix of a wildcard attribute (`aria-*` → `aria-`)
pub fn wildcard_prefix(name: &str) -> Option<&str> {
    name.strip_suffix('*').filter(|prefix| prefix.ends_with('-'))
}
