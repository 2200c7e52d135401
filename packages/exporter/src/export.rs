//! Site export: directory layout, static files and every page.

use std::fs;
use std::path::{Path, PathBuf};

use shr_javadoc_engine::Documentation;

use crate::assets::STATIC_ASSETS;
use crate::config;
use crate::error::{ExportError, Result};
use crate::render::Renderer;
use crate::writer::write_atomic;

/// Counts reported after a successful export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub out_dir: PathBuf,
    pub namespaces: usize,
    pub elements: usize,
    /// Rendered pages, not counting static files.
    pub pages: usize,
    pub assets: usize,
    pub warnings: usize,
}

/// Render `doc` into `out_dir`.
///
/// # Errors
/// Fails on the first page that cannot be rendered or written. Pages
/// written before the failure are left in place.
pub fn export(doc: &Documentation, out_dir: &Path) -> Result<ExportSummary> {
    Exporter::new(doc, out_dir, Renderer::new()?).run()
}

/// Writes one site; each step mirrors a group of output files.
pub struct Exporter<'a> {
    doc: &'a Documentation,
    out_dir: &'a Path,
    renderer: Renderer,
    summary: ExportSummary,
}

impl<'a> Exporter<'a> {
    #[must_use]
    pub fn new(doc: &'a Documentation, out_dir: &'a Path, renderer: Renderer) -> Self {
        Self {
            doc,
            out_dir,
            renderer,
            summary: ExportSummary {
                out_dir: out_dir.to_path_buf(),
                namespaces: doc.namespaces.len(),
                elements: doc.elements.len(),
                warnings: doc.warnings.len(),
                ..ExportSummary::default()
            },
        }
    }

    /// Run every step in order and return the counts.
    pub fn run(mut self) -> Result<ExportSummary> {
        tracing::info!(out_dir = %self.out_dir.display(), "Exporting documentation");

        self.build_output_directory()?;
        self.copy_static_assets()?;
        self.build_package_files()?;
        self.build_info_files()?;
        self.build_overview_frame()?;
        self.build_overview_summary()?;
        self.build_all_elements_frame()?;
        self.build_data_elements()?;

        tracing::info!(
            pages = self.summary.pages,
            assets = self.summary.assets,
            "Export finished"
        );
        Ok(self.summary)
    }

    /// Create the site root and one directory per namespace.
    pub fn build_output_directory(&mut self) -> Result<()> {
        if self.out_dir.exists() && !self.out_dir.is_dir() {
            return Err(ExportError::NotADirectory(self.out_dir.to_path_buf()));
        }
        fs::create_dir_all(self.out_dir)?;

        for namespace in &self.doc.namespaces {
            fs::create_dir_all(self.out_dir.join(&namespace.path))?;
        }
        Ok(())
    }

    pub fn copy_static_assets(&mut self) -> Result<()> {
        for asset in STATIC_ASSETS {
            write_atomic(&self.out_dir.join(asset.path), asset.contents)?;
            self.summary.assets += 1;
        }
        Ok(())
    }

    /// `<path>/<path>-pkg.html` for every namespace.
    pub fn build_package_files(&mut self) -> Result<()> {
        let doc = self.doc;
        for namespace in &doc.namespaces {
            let html = self.renderer.package_page(doc, namespace)?;
            let path = self
                .out_dir
                .join(&namespace.path)
                .join(config::package_page(&namespace.path));
            self.write_page(&path, &html)?;
        }
        Ok(())
    }

    /// `<path>/<path>-info.html` for every namespace.
    pub fn build_info_files(&mut self) -> Result<()> {
        let doc = self.doc;
        for namespace in &doc.namespaces {
            let html = self.renderer.info_page(doc, namespace)?;
            let path = self
                .out_dir
                .join(&namespace.path)
                .join(config::info_page(&namespace.path));
            self.write_page(&path, &html)?;
        }
        Ok(())
    }

    pub fn build_overview_frame(&mut self) -> Result<()> {
        let html = self.renderer.overview_frame(self.doc)?;
        self.write_page(&self.out_dir.join(config::OVERVIEW_FRAME), &html)
    }

    pub fn build_overview_summary(&mut self) -> Result<()> {
        let html = self.renderer.overview_summary(self.doc)?;
        self.write_page(&self.out_dir.join(config::OVERVIEW_SUMMARY), &html)
    }

    pub fn build_all_elements_frame(&mut self) -> Result<()> {
        let html = self.renderer.allclasses_frame(self.doc)?;
        self.write_page(&self.out_dir.join(config::ALLCLASSES_FRAME), &html)
    }

    /// `<namespacePath>/<name>.html` for every element.
    pub fn build_data_elements(&mut self) -> Result<()> {
        let doc = self.doc;
        tracing::info!(elements = doc.elements.len(), "Building element pages");

        for element in &doc.elements {
            let html = self.renderer.element_page(doc, element)?;
            let path = self
                .out_dir
                .join(&element.namespace_path)
                .join(&element.file_name);
            self.write_page(&path, &html)?;
        }
        Ok(())
    }

    fn write_page(&mut self, path: &Path, html: &str) -> Result<()> {
        write_atomic(path, html)?;
        self.summary.pages += 1;
        Ok(())
    }
}
