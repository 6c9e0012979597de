//! The flat element DSL.
//!
//! Every render-tree node inside a clip is a single string of the form
//! `"Tag;key1:value1;key2:value2;..."`. The flat grammar keeps the
//! structured-decoding schema shallow (an array of strings) which is far
//! more reliable for constrained generation than deeply nested objects.
//! Hierarchy is expressed through `parent` properties, not containment.

/// One parsed DSL element: a tag plus its insertion-ordered properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedElement {
    /// Element tag (e.g. `Video`, `Img`, `Txt`, `div`).
    pub tag: String,

    /// Property key/value pairs in their original order.
    pub properties: Vec<(String, String)>,
}

impl ParsedElement {
    /// Parse a DSL string.
    ///
    /// Returns `None` when the string contains no `;` separator; such
    /// strings are opaque to every consumer and must be passed through
    /// unmodified, never rejected.
    ///
    /// Each field after the tag is split on the FIRST `:` only, so values
    /// may legitimately contain further colons (`fill:rgb(0,0,0)` or
    /// `src:https://...`). Fields without a `:` are ignored.
    pub fn parse(dsl: &str) -> Option<Self> {
        if !dsl.contains(';') {
            return None;
        }

        let mut parts = dsl.split(';');
        let tag = parts.next()?.trim().to_string();

        let mut properties = Vec::new();
        for part in parts {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if let Some((key, value)) = part.split_once(':') {
                properties.push((key.trim().to_string(), value.trim().to_string()));
            }
        }

        Some(Self { tag, properties })
    }

    /// Look up a property value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a property is present.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Append a property at the end, after all original properties.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.push((key.into(), value.into()));
    }

    /// The element's parent id, or `None` for an implicit root child.
    ///
    /// `root` and `null` are the sentinel spellings generators produce for
    /// top-level elements; both normalize to `None` so no other component
    /// needs to compare sentinel strings.
    pub fn parent(&self) -> Option<&str> {
        match self.get("parent") {
            None | Some("root") | Some("null") => None,
            Some(id) => Some(id),
        }
    }

    /// Reconstruct the DSL string, preserving original property order.
    pub fn to_dsl_string(&self) -> String {
        let mut out = self.tag.clone();
        for (key, value) in &self.properties {
            out.push(';');
            out.push_str(key);
            out.push(':');
            out.push_str(value);
        }
        out
    }
}
