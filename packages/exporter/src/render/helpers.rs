//! Handlebars helpers used by the page templates.
//!
//! Helpers write straight to the output, bypassing the registry's escape
//! function, so every model-provided string goes through `html_escape`.

use handlebars::{html_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::Value;

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// `{{concept this}}`: a coded concept as `display (system#code)`.
pub fn concept_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let Some(concept) = h.param(0).map(|p| p.value()) else {
        return Ok(());
    };

    let code = format!(
        "{}#{}",
        str_field(concept, "system").unwrap_or(""),
        str_field(concept, "code").unwrap_or("")
    );
    let text = match str_field(concept, "display") {
        Some(display) => format!("{display} ({code})"),
        None => code,
    };
    out.write(&html_escape(&text))?;
    Ok(())
}

/// `{{kind element}}`: heading label for an element page.
pub fn kind_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let element = h.param(0).map(|p| p.value());
    let flag = |key: &str| {
        element
            .and_then(|e| e.get(key))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    };

    let label = if flag("isAbstract") {
        "Abstract Data Element"
    } else if flag("isEntry") {
        "Entry Data Element"
    } else {
        "Data Element"
    };
    out.write(label)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> Handlebars<'static> {
        let mut handlebars = Handlebars::new();
        handlebars.register_helper("concept", Box::new(concept_helper));
        handlebars.register_helper("kind", Box::new(kind_helper));
        handlebars
    }

    #[test]
    fn test_concept_with_display() {
        let out = registry()
            .render_template(
                "{{concept c}}",
                &json!({ "c": { "system": "http://loinc.org", "code": "8716-3", "display": "Vital signs" } }),
            )
            .unwrap();
        assert_eq!(out, "Vital signs (http://loinc.org#8716-3)");
    }

    #[test]
    fn test_concept_is_escaped() {
        let out = registry()
            .render_template("{{concept c}}", &json!({ "c": { "code": "<b>" } }))
            .unwrap();
        assert_eq!(out, "#&lt;b&gt;");
    }

    #[test]
    fn test_kind_labels() {
        let handlebars = registry();
        let render = |element| {
            handlebars
                .render_template("{{kind e}}", &json!({ "e": element }))
                .unwrap()
        };
        assert_eq!(render(json!({ "isAbstract": true, "isEntry": true })), "Abstract Data Element");
        assert_eq!(render(json!({ "isEntry": true })), "Entry Data Element");
        assert_eq!(render(json!({})), "Data Element");
    }
}
