//! Index page listing the documentation of each module in a modules
//! directory.

use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleDocs {
    Index,
    NoIndex,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub docs: ModuleDocs,
}

/// Direct subdirectories of `dir`, sorted by name.
pub fn scan(dir: &Path) -> Result<Vec<Module>> {
    let entries = std::fs::read_dir(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading modules directory {}", dir.display()))?;

    let mut modules = Vec::new();
    for entry in entries {
        let entry = entry.into_diagnostic()?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let docs = path.join("docs");
        let docs = if docs.join("index.md").is_file() {
            ModuleDocs::Index
        } else if docs.is_dir() {
            ModuleDocs::NoIndex
        } else {
            ModuleDocs::Missing
        };
        modules.push(Module {
            name: entry.file_name().to_string_lossy().into_owned(),
            docs,
        });
    }
    modules.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(count = modules.len(), dir = %dir.display(), "scanned modules");
    Ok(modules)
}

pub fn render(modules: &[Module]) -> String {
    let mut out = String::from(
        "# Module documentation\n\nGenerated from the modules directory. Do not edit by hand.\n\n## Modules\n\n",
    );
    for Module { name, docs } in modules {
        let line = match docs {
            ModuleDocs::Index => {
                format!("- {name}: [modules/{name}/docs/index.md](modules/{name}/docs/index.md)\n")
            }
            ModuleDocs::NoIndex => format!("- {name}: modules/{name}/docs/ (docs without index)\n"),
            ModuleDocs::Missing => format!("- {name}: (no docs directory)\n"),
        };
        out.push_str(&line);
    }
    out
}
