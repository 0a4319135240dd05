//! Named text renderings of logical models.
//!
//! Formatters live in an explicit `FormatterContext` which must be initialized before use.
//! Initialization registers the built-in formatters (`source`, `bnet` and `dot`) and it is
//! idempotent: initializing an already initialized context does nothing.

use crate::io::{ExportFormat, TextExport};
use crate::{Error, LogicalModel};
use std::collections::BTreeMap;
use tracing::debug;

/// A function which renders a model as text.
pub type Formatter = Box<dyn Fn(&LogicalModel) -> Result<String, Error> + Send + Sync>;

/// Registry of named formatters with an `Uninitialized -> Initialized` life cycle.
#[derive(Default)]
pub struct FormatterContext {
    state: ContextState,
}

/// **(internal)** Life cycle of a `FormatterContext`.
#[derive(Default)]
enum ContextState {
    #[default]
    Uninitialized,
    Initialized(BTreeMap<String, Formatter>),
}

impl FormatterContext {
    pub fn new() -> FormatterContext {
        FormatterContext::default()
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, ContextState::Initialized(_))
    }

    /// Register the built-in formatters. Returns `false` if the context was already
    /// initialized, in which case nothing changes.
    pub fn initialize(&mut self) -> bool {
        if self.is_initialized() {
            return false;
        }
        let mut formatters: BTreeMap<String, Formatter> = BTreeMap::new();
        formatters.insert(
            "source".to_string(),
            Box::new(|model: &LogicalModel| Ok(model.source(" <- "))),
        );
        formatters.insert(
            "bnet".to_string(),
            Box::new(|model: &LogicalModel| model.export_text(ExportFormat::Bnet)),
        );
        formatters.insert(
            "dot".to_string(),
            Box::new(|model: &LogicalModel| Ok(model.influence_graph().to_dot())),
        );
        debug!(formatters = formatters.len(), "Formatter context initialized.");
        self.state = ContextState::Initialized(formatters);
        true
    }

    /// Add (or replace) a formatter.
    pub fn register(&mut self, name: &str, formatter: Formatter) -> Result<(), Error> {
        match &mut self.state {
            ContextState::Uninitialized => Err(Error::FormattersNotInitialized),
            ContextState::Initialized(formatters) => {
                formatters.insert(name.to_string(), formatter);
                Ok(())
            }
        }
    }

    /// Names of the registered formatters, sorted.
    pub fn available(&self) -> Result<Vec<&str>, Error> {
        Ok(self.formatters()?.keys().map(|it| it.as_str()).collect())
    }

    pub fn format(&self, name: &str, model: &LogicalModel) -> Result<String, Error> {
        let formatter = self
            .formatters()?
            .get(name)
            .ok_or_else(|| Error::UnknownFormatter(name.to_string()))?;
        formatter(model)
    }

    fn formatters(&self) -> Result<&BTreeMap<String, Formatter>, Error> {
        match &self.state {
            ContextState::Uninitialized => Err(Error::FormattersNotInitialized),
            ContextState::Initialized(formatters) => Ok(formatters),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::formatters::FormatterContext;
    use crate::{BooleanNetwork, Error, LogicalModel, MultiValuedNetwork};
    use pretty_assertions::assert_eq;

    fn model() -> LogicalModel {
        BooleanNetwork::try_from_source("b <- !a\na <- b")
            .unwrap()
            .into()
    }

    #[test]
    fn context_life_cycle() {
        let mut context = FormatterContext::new();
        assert!(!context.is_initialized());
        assert!(matches!(
            context.format("source", &model()),
            Err(Error::FormattersNotInitialized)
        ));
        assert!(context.available().is_err());
        assert!(context.register("x", Box::new(|_: &LogicalModel| Ok(String::new()))).is_err());

        assert!(context.initialize());
        assert!(!context.initialize());
        assert_eq!(vec!["bnet", "dot", "source"], context.available().unwrap());
    }

    #[test]
    fn built_in_formatters() {
        let mut context = FormatterContext::new();
        context.initialize();
        let model = model();
        assert_eq!("a <- b\nb <- !a\n", context.format("source", &model).unwrap());
        assert_eq!(
            "targets, factors\na, b\nb, !a\n",
            context.format("bnet", &model).unwrap()
        );
        let dot = context.format("dot", &model).unwrap();
        assert!(dot.starts_with("digraph G {"));
        assert!(matches!(
            context.format("sbml", &model),
            Err(Error::UnknownFormatter(_))
        ));

        let mn: LogicalModel = MultiValuedNetwork::try_from_source("a:2 <- a:1")
            .unwrap()
            .into();
        assert!(matches!(
            context.format("bnet", &mn),
            Err(Error::UnsupportedNetwork(_))
        ));
    }

    #[test]
    fn custom_formatters() {
        let mut context = FormatterContext::new();
        context.initialize();
        context
            .register(
                "size",
                Box::new(|model: &LogicalModel| Ok(model.num_nodes().to_string())),
            )
            .unwrap();
        assert_eq!("2", context.format("size", &model()).unwrap());
        // Re-initialization keeps custom formatters.
        context.initialize();
        assert!(context.available().unwrap().contains(&"size"));
    }
}
