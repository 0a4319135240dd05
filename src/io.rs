//! Import and export of networks through narrow, explicit interfaces.
//!
//! A network can be built from a `ModelSource`: its textual source, a file, a list of
//! `(node, formula)` rules, or a foreign object which knows how to export itself into
//! one of the textual formats (`TextExport`). Identifiers of online models are first
//! turned into local paths by a `ModelResolver`, and intermediate files are requested
//! from an `OutputFiles` provider.

use crate::{BooleanNetwork, Error, LogicalModel, MultiValuedNetwork};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Textual formats understood by the network parsers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ExportFormat {
    /// Boolean rules `node, formula` (with a `targets, factors` header).
    Bnet,
    /// Multi-valued rules `node[:level] <- formula`.
    Mnet,
}

/// An object which can describe itself in one of the textual network formats.
pub trait TextExport {
    fn export_text(&self, format: ExportFormat) -> Result<String, Error>;
}

/// Where a network should be read from.
pub enum ModelSource<'a> {
    Text(&'a str),
    File(PathBuf),
    /// A list of `(node, formula)` pairs, where formulas are parsed by the network algebra.
    Rules(Vec<(String, String)>),
    Foreign(&'a dyn TextExport),
}

/// Resolves a (possibly URL-like) model identifier to a readable local file.
pub trait ModelResolver {
    fn resolve(&self, identifier: &str) -> Result<PathBuf, Error>;
}

/// Identity resolver: every identifier is already a local path.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFiles;

/// Provides writable paths for intermediate serialisation of networks.
pub trait OutputFiles {
    /// A fresh path with the given extension (without the leading dot).
    fn new_output(&mut self, extension: &str) -> Result<PathBuf, Error>;
}

/// Numbered output files (`<prefix><n>.<extension>`) inside one directory.
#[derive(Clone, Debug)]
pub struct SessionFiles {
    directory: PathBuf,
    prefix: String,
    counter: usize,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Bnet => "bnet",
            ExportFormat::Mnet => "mnet",
        }
    }

    /// Guess the format from the extension of a path. Unknown extensions are `Bnet`.
    pub fn from_path(path: &Path) -> ExportFormat {
        match path.extension().and_then(|it| it.to_str()) {
            Some("mnet") => ExportFormat::Mnet,
            _ => ExportFormat::Bnet,
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl ModelResolver for LocalFiles {
    fn resolve(&self, identifier: &str) -> Result<PathBuf, Error> {
        let path = PathBuf::from(identifier);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no model file `{}`", identifier),
            )))
        }
    }
}

impl SessionFiles {
    /// Output files in `directory`, which is created if it does not exist.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<SessionFiles, Error> {
        let directory = directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&directory)?;
        Ok(SessionFiles {
            directory,
            prefix: "model".to_string(),
            counter: 0,
        })
    }

    pub fn with_prefix(mut self, prefix: &str) -> SessionFiles {
        self.prefix = prefix.to_string();
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl OutputFiles for SessionFiles {
    fn new_output(&mut self, extension: &str) -> Result<PathBuf, Error> {
        self.counter += 1;
        let name = format!("{}{}.{}", self.prefix, self.counter, extension);
        Ok(self.directory.join(name))
    }
}

impl TextExport for BooleanNetwork {
    fn export_text(&self, format: ExportFormat) -> Result<String, Error> {
        Ok(match format {
            ExportFormat::Bnet => self.to_bnet(),
            ExportFormat::Mnet => self.source(" <- "),
        })
    }
}

impl TextExport for MultiValuedNetwork {
    fn export_text(&self, format: ExportFormat) -> Result<String, Error> {
        match format {
            ExportFormat::Mnet => Ok(self.source(" <- ")),
            ExportFormat::Bnet => Err(Error::UnsupportedNetwork(
                "bnet can only describe Boolean networks".to_string(),
            )),
        }
    }
}

impl TextExport for LogicalModel {
    fn export_text(&self, format: ExportFormat) -> Result<String, Error> {
        match self {
            LogicalModel::Boolean(network) => network.export_text(format),
            LogicalModel::MultiValued(network) => network.export_text(format),
        }
    }
}

impl BooleanNetwork {
    pub fn import(source: ModelSource) -> Result<BooleanNetwork, Error> {
        match source {
            ModelSource::Text(text) => BooleanNetwork::try_from_source(text),
            ModelSource::File(path) => BooleanNetwork::load(path),
            ModelSource::Rules(rules) => {
                let mut network = BooleanNetwork::new();
                for (node, formula) in rules {
                    network.set_string_formula(&node, &formula)?;
                }
                Ok(network)
            }
            ModelSource::Foreign(handle) => {
                let text = handle.export_text(ExportFormat::Bnet)?;
                BooleanNetwork::try_from_source(&text)
            }
        }
    }

    /// Read a network from a local file in the textual source format.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<BooleanNetwork, Error> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading Boolean network.");
        let content = std::fs::read_to_string(path)?;
        BooleanNetwork::try_from_source(&content)
    }

    /// Resolve `identifier` to a local file and read the network from it.
    pub fn load_with(resolver: &dyn ModelResolver, identifier: &str) -> Result<BooleanNetwork, Error> {
        let path = resolver.resolve(identifier)?;
        BooleanNetwork::load(path)
    }

    /// Write the `bnet` source of this network into a new output file and return its path.
    pub fn export_with(&self, outputs: &mut dyn OutputFiles) -> Result<PathBuf, Error> {
        export(self, ExportFormat::Bnet, outputs)
    }
}

impl MultiValuedNetwork {
    pub fn import(source: ModelSource) -> Result<MultiValuedNetwork, Error> {
        match source {
            ModelSource::Text(text) => MultiValuedNetwork::try_from_source(text),
            ModelSource::File(path) => MultiValuedNetwork::load(path),
            ModelSource::Rules(rules) => {
                let mut network = MultiValuedNetwork::new();
                for (symbol, formula) in rules {
                    network.append_formula(&symbol, &formula)?;
                }
                Ok(network)
            }
            ModelSource::Foreign(handle) => {
                let text = handle.export_text(ExportFormat::Mnet)?;
                MultiValuedNetwork::try_from_source(&text)
            }
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<MultiValuedNetwork, Error> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading multi-valued network.");
        let content = std::fs::read_to_string(path)?;
        MultiValuedNetwork::try_from_source(&content)
    }

    pub fn load_with(
        resolver: &dyn ModelResolver,
        identifier: &str,
    ) -> Result<MultiValuedNetwork, Error> {
        let path = resolver.resolve(identifier)?;
        MultiValuedNetwork::load(path)
    }

    pub fn export_with(&self, outputs: &mut dyn OutputFiles) -> Result<PathBuf, Error> {
        export(self, ExportFormat::Mnet, outputs)
    }
}

impl LogicalModel {
    /// Load a model from a file, using the `mnet` extension to recognise multi-valued
    /// networks.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<LogicalModel, Error> {
        let path = path.as_ref();
        Ok(match ExportFormat::from_path(path) {
            ExportFormat::Bnet => LogicalModel::Boolean(BooleanNetwork::load(path)?),
            ExportFormat::Mnet => LogicalModel::MultiValued(MultiValuedNetwork::load(path)?),
        })
    }
}

/// **(internal)** Write `network` in `format` to a fresh output file.
fn export(
    network: &dyn TextExport,
    format: ExportFormat,
    outputs: &mut dyn OutputFiles,
) -> Result<PathBuf, Error> {
    let path = outputs.new_output(format.extension())?;
    std::fs::write(&path, network.export_text(format)?)?;
    debug!(path = %path.display(), format = %format, "Network exported.");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use crate::io::{
        ExportFormat, LocalFiles, ModelSource, OutputFiles, SessionFiles, TextExport,
    };
    use crate::{BooleanNetwork, Error, LogicalModel, MultiValuedNetwork};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    /// A foreign object which only knows its own rules.
    struct ForeignModel;

    impl TextExport for ForeignModel {
        fn export_text(&self, format: ExportFormat) -> Result<String, Error> {
            Ok(match format {
                ExportFormat::Bnet => "targets, factors\na, !b\nb, a\n".to_string(),
                ExportFormat::Mnet => "a:1 <- b\na:2 <- b & a:1\nb <- a:2\n".to_string(),
            })
        }
    }

    fn session(name: &str) -> SessionFiles {
        let directory = std::env::temp_dir().join(format!(
            "minibn-io-{}-{}",
            name,
            std::process::id()
        ));
        SessionFiles::new(directory).unwrap()
    }

    #[test]
    fn import_from_every_source() {
        let text = BooleanNetwork::import(ModelSource::Text("a <- !b\nb <- a")).unwrap();
        let rules = BooleanNetwork::import(ModelSource::Rules(vec![
            ("a".to_string(), "!b".to_string()),
            ("b".to_string(), "a".to_string()),
        ]))
        .unwrap();
        let foreign = BooleanNetwork::import(ModelSource::Foreign(&ForeignModel)).unwrap();
        assert_eq!(text.to_string(), rules.to_string());
        assert_eq!(text.to_string(), foreign.to_string());

        let mn = MultiValuedNetwork::import(ModelSource::Foreign(&ForeignModel)).unwrap();
        assert_eq!(Some(2), mn.max_level("a"));
        assert!(BooleanNetwork::import(ModelSource::Rules(vec![(
            "a".to_string(),
            "b &".to_string()
        )]))
        .is_err());
    }

    #[test]
    fn export_and_load_files() {
        let mut outputs = session("export");
        let bn = BooleanNetwork::try_from_source("a <- !b\nb <- a & c\nc <- c").unwrap();
        let path = bn.export_with(&mut outputs).unwrap();
        assert_eq!(Some("bnet"), path.extension().and_then(|it| it.to_str()));
        let loaded = BooleanNetwork::load_with(&LocalFiles, path.to_str().unwrap()).unwrap();
        assert_eq!(bn.to_string(), loaded.to_string());
        let file = BooleanNetwork::import(ModelSource::File(path.clone())).unwrap();
        assert_eq!(bn.to_string(), file.to_string());

        let mn = MultiValuedNetwork::try_from_source("a:1 <- b\na:2 <- b & a:1\nb <- a:2").unwrap();
        let mn_path = mn.export_with(&mut outputs).unwrap();
        assert_ne!(path, mn_path);
        let model = LogicalModel::load(&mn_path).unwrap();
        assert!(!model.is_boolean());
        assert_eq!(mn.to_string(), model.to_string());
        std::fs::remove_dir_all(outputs.directory()).unwrap();
    }

    #[test]
    fn session_files_are_numbered() {
        let mut outputs = session("numbered").with_prefix("net");
        let first = outputs.new_output("bnet").unwrap();
        let second = outputs.new_output("bnet").unwrap();
        assert_eq!(outputs.directory().join("net1.bnet"), first);
        assert_eq!(outputs.directory().join("net2.bnet"), second);
        std::fs::remove_dir_all(outputs.directory()).unwrap();
    }

    #[test]
    fn missing_files() {
        let missing = PathBuf::from("/this/path/does/not/exist.bnet");
        assert!(matches!(BooleanNetwork::load(&missing), Err(Error::Io(_))));
        assert!(matches!(
            BooleanNetwork::load_with(&LocalFiles, "/this/path/does/not/exist.bnet"),
            Err(Error::Io(_))
        ));
        let mn = MultiValuedNetwork::try_from_source("a:2 <- b\nb <- a:1").unwrap();
        assert!(matches!(
            mn.export_text(ExportFormat::Bnet),
            Err(Error::UnsupportedNetwork(_))
        ));
    }
}
