//! HTML page rendering.
//!
//! Templates and partials are compiled into the binary and registered once
//! per [`Renderer`]. Every page gets the same frame context (`title`, `root`,
//! `metaData`, `generated`) plus its own page data.

mod helpers;

use handlebars::Handlebars;
use serde::Serialize;
use shr_javadoc_engine::{Documentation, ElementDoc, ElementRef, NamespaceDoc, ProjectInfo};

use crate::config::TIMESTAMP_FORMAT;
use crate::error::{ExportError, Result};

const OVERVIEW_FRAME: &str = "overview-frame";
const OVERVIEW_SUMMARY: &str = "overview-summary";
const ALLCLASSES_FRAME: &str = "allclasses-frame";
const PACKAGE: &str = "pkg";
const INFO: &str = "info";
const DATA_ELEMENT: &str = "dataElement";

const TEMPLATES: [(&str, &str); 6] = [
    (OVERVIEW_FRAME, include_str!("../../templates/overview-frame.hbs")),
    (OVERVIEW_SUMMARY, include_str!("../../templates/overview-summary.hbs")),
    (ALLCLASSES_FRAME, include_str!("../../templates/allclasses-frame.hbs")),
    (PACKAGE, include_str!("../../templates/pkg.hbs")),
    (INFO, include_str!("../../templates/info.hbs")),
    (DATA_ELEMENT, include_str!("../../templates/dataElement.hbs")),
];

const PARTIALS: [(&str, &str); 3] = [
    ("head", include_str!("../../templates/partials/head.hbs")),
    ("footer", include_str!("../../templates/partials/footer.hbs")),
    ("constraints", include_str!("../../templates/partials/constraints.hbs")),
];

/// Relative prefix from a page back to the site root.
const SITE_ROOT: &str = "";
const NAMESPACE_DIR: &str = "../";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Page<'a, T> {
    title: &'a str,
    root: &'static str,
    meta_data: &'a ProjectInfo,
    generated: &'a str,
    #[serde(flatten)]
    body: T,
}

#[derive(Serialize)]
struct NamespaceList<'a> {
    namespaces: &'a [NamespaceDoc],
}

#[derive(Serialize)]
struct ElementList<'a> {
    elements: Vec<&'a ElementDoc>,
}

#[derive(Serialize)]
struct NamespaceBody<'a> {
    namespace: &'a NamespaceDoc,
    elements: Vec<&'a ElementDoc>,
}

#[derive(Serialize)]
struct ElementBody<'a> {
    element: &'a ElementDoc,
    /// Ancestors, root first.
    ancestry: Vec<&'a ElementRef>,
}

/// Compiled page templates.
pub struct Renderer {
    handlebars: Handlebars<'static>,
    generated: String,
}

impl Renderer {
    /// Register every embedded template, partial and helper.
    ///
    /// # Errors
    /// Returns `Template` if an embedded template does not compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        for (name, source) in PARTIALS {
            handlebars.register_partial(name, source)?;
        }
        for (name, source) in TEMPLATES {
            handlebars.register_template_string(name, source)?;
        }
        handlebars.register_helper("concept", Box::new(helpers::concept_helper));
        handlebars.register_helper("kind", Box::new(helpers::kind_helper));

        Ok(Self {
            handlebars,
            generated: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        })
    }

    /// Override the footer timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, generated: impl Into<String>) -> Self {
        self.generated = generated.into();
        self
    }

    pub fn overview_frame(&self, doc: &Documentation) -> Result<String> {
        let body = NamespaceList {
            namespaces: &doc.namespaces,
        };
        self.render(OVERVIEW_FRAME, "Namespaces", SITE_ROOT, &doc.project, body)
    }

    pub fn overview_summary(&self, doc: &Documentation) -> Result<String> {
        let body = ElementList {
            elements: doc.elements.iter().collect(),
        };
        self.render(OVERVIEW_SUMMARY, "Overview", SITE_ROOT, &doc.project, body)
    }

    /// Only elements with at least one ancestor are listed.
    pub fn allclasses_frame(&self, doc: &Documentation) -> Result<String> {
        let body = ElementList {
            elements: doc.all_classes().collect(),
        };
        self.render(ALLCLASSES_FRAME, "All Elements", SITE_ROOT, &doc.project, body)
    }

    pub fn package_page(&self, doc: &Documentation, namespace: &NamespaceDoc) -> Result<String> {
        let body = namespace_body(doc, namespace);
        self.render(PACKAGE, &namespace.name, NAMESPACE_DIR, &doc.project, body)
    }

    pub fn info_page(&self, doc: &Documentation, namespace: &NamespaceDoc) -> Result<String> {
        let body = namespace_body(doc, namespace);
        self.render(INFO, &namespace.name, NAMESPACE_DIR, &doc.project, body)
    }

    pub fn element_page(&self, doc: &Documentation, element: &ElementDoc) -> Result<String> {
        let body = ElementBody {
            element,
            ancestry: element.hierarchy.iter().rev().collect(),
        };
        self.render(DATA_ELEMENT, &element.name, NAMESPACE_DIR, &doc.project, body)
    }

    fn render<T: Serialize>(
        &self,
        template: &'static str,
        title: &str,
        root: &'static str,
        project: &ProjectInfo,
        body: T,
    ) -> Result<String> {
        let page = Page {
            title,
            root,
            meta_data: project,
            generated: &self.generated,
            body,
        };
        self.handlebars
            .render(template, &page)
            .map_err(|source| ExportError::Render { template, source })
    }
}

fn namespace_body<'a>(doc: &'a Documentation, namespace: &'a NamespaceDoc) -> NamespaceBody<'a> {
    NamespaceBody {
        namespace,
        elements: doc
            .elements
            .iter()
            .filter(|e| e.namespace == namespace.name)
            .collect(),
    }
}
