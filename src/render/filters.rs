//! Liquid filters registered on every template parser.
//!
//! ```text
//! {{ "/js/app.js" | vite }}      → served path, or the logical path when unknown
//! {{ "/js/app.js" | vite_tag }}  → <script type="module" src="..."></script>
//! {{ user | json }}              → JSON encoding of any view-data value
//! ```

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use liquid_core::parser::{Filter, FilterArguments, FilterReflection, ParameterReflection, ParseFilter};
use liquid_core::runtime::Runtime;
use liquid_core::{Error, Result, Value, ValueView};

use crate::render::AssetManifest;

/// Manifest shared between a renderer and its parsed filters.
pub type SharedAssets = Arc<ArcSwap<AssetManifest>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterKind {
    Vite,
    ViteTag,
    Json,
}

impl FilterKind {
    fn name(self) -> &'static str {
        match self {
            FilterKind::Vite => "vite",
            FilterKind::ViteTag => "vite_tag",
            FilterKind::Json => "json",
        }
    }

    fn description(self) -> &'static str {
        match self {
            FilterKind::Vite => "Resolve a logical asset path through the build manifest.",
            FilterKind::ViteTag => "Module script tag for a logical asset path.",
            FilterKind::Json => "Encode the input as JSON.",
        }
    }
}

/// One adapter filter; acts as both its parser and its parsed form.
#[derive(Debug, Clone)]
pub struct TemplateFilter {
    kind: FilterKind,
    assets: SharedAssets,
}

/// Every adapter filter, bound to `assets`.
pub fn template_filters(assets: &SharedAssets) -> Vec<TemplateFilter> {
    [FilterKind::Vite, FilterKind::ViteTag, FilterKind::Json]
        .into_iter()
        .map(|kind| TemplateFilter {
            kind,
            assets: assets.clone(),
        })
        .collect()
}

impl FilterReflection for TemplateFilter {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn description(&self) -> &str {
        self.kind.description()
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for TemplateFilter {
    fn parse(&self, mut arguments: FilterArguments) -> Result<Box<dyn Filter>> {
        if arguments.positional.next().is_some() || arguments.keyword.next().is_some() {
            return Err(Error::with_msg(format!(
                "filter `{}` takes no arguments",
                self.kind.name()
            )));
        }
        Ok(Box::new(self.clone()))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}

impl fmt::Display for TemplateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())
    }
}

impl Filter for TemplateFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> Result<Value> {
        match self.kind {
            FilterKind::Vite => {
                let path = input.to_kstr();
                Ok(Value::scalar(self.assets.load().resolve(path.as_str())))
            }
            FilterKind::ViteTag => {
                let path = input.to_kstr();
                Ok(Value::scalar(self.assets.load().script_tag(path.as_str())))
            }
            FilterKind::Json => serde_json::to_string(&input.to_value())
                .map(Value::scalar)
                .map_err(|e| Error::with_msg(format!("json: {}", e))),
        }
    }
}
