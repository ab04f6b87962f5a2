use thiserror::Error;

/// Errors that can occur during invoice construction or XRechnung generation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RechnungError {
    /// Builder received a value that violates a model invariant.
    #[error("builder error: {0}")]
    Builder(String),

    /// A tax category code outside UNTDID 5305 subset used by XRechnung.
    #[error("unknown tax category: {0}")]
    UnknownTaxCategory(String),

    /// The XML document could not be produced. Carries the underlying cause.
    #[error("XRechnung creation failed")]
    Creation(#[source] XmlError),
}

/// Errors raised by the namespaced XML tree builder.
///
/// These indicate misuse of the builder (an engine defect) or a failure of
/// the output writer, never a problem with invoice data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XmlError {
    /// An element was requested for a namespace URI that was never registered.
    #[error("unknown namespace URI {0}")]
    UnknownNamespace(String),

    /// `set_root` was called a second time.
    #[error("root node already set")]
    RootAlreadySet,

    /// `serialize` was called before a root element was set.
    #[error("document has no root element")]
    MissingRoot,

    /// The underlying writer failed.
    #[error("XML write error: {0}")]
    Write(#[from] std::io::Error),

    /// Serialized output was not valid UTF-8.
    #[error("XML UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<XmlError> for RechnungError {
    fn from(e: XmlError) -> Self {
        RechnungError::Creation(e)
    }
}
