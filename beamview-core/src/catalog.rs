//! Catalog run handles: streams, descriptors, and field metadata.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::source::ArraySource;

/// Declared shape metadata for one field of a descriptor.
///
/// The event/time dimension is implicit and not part of the declared shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataKey {
    /// Declared array shape, one entry per dimension.
    pub shape: Vec<usize>,
}

impl DataKey {
    /// Creates shape metadata for a field.
    #[must_use]
    pub fn new(shape: Vec<usize>) -> Self {
        Self { shape }
    }

    /// Number of declared dimensions.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
}

/// Metadata for one batch of data points within a stream.
///
/// Field order is significant: the preview heuristic picks the first
/// qualifying field in insertion order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Descriptor {
    data_keys: Vec<(String, DataKey)>,
}

impl Descriptor {
    /// Creates an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field with its declared shape.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, key: DataKey) -> Self {
        self.data_keys.push((name.into(), key));
        self
    }

    /// Iterates fields in insertion order.
    pub fn data_keys(&self) -> impl Iterator<Item = (&str, &DataKey)> {
        self.data_keys.iter().map(|(n, k)| (n.as_str(), k))
    }
}

/// A named sequence of data-point descriptors plus per-field lazy data.
#[derive(Clone)]
pub struct Stream {
    name: String,
    descriptors: Vec<Descriptor>,
    data: Vec<(String, Arc<dyn ArraySource>)>,
}

impl Stream {
    /// Creates an empty stream with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptors: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Appends a descriptor.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: Descriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Attaches a lazy data source for a field.
    #[must_use]
    pub fn with_source(mut self, field: impl Into<String>, source: Arc<dyn ArraySource>) -> Self {
        self.data.push((field.into(), source));
        self
    }

    /// Stream name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First descriptor, if any.
    #[must_use]
    pub fn first_descriptor(&self) -> Option<&Descriptor> {
        self.descriptors.first()
    }

    /// Looks up the lazy source for a field.
    #[must_use]
    pub fn source(&self, field: &str) -> Option<&Arc<dyn ArraySource>> {
        self.data.iter().find(|(n, _)| n == field).map(|(_, s)| s)
    }
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("name", &self.name)
            .field("descriptors", &self.descriptors)
            .field("fields", &self.data.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish()
    }
}

/// An ordered collection of streams.
///
/// Stream order is the catalog's natural order; duplicate names are allowed
/// and lookup returns the first match.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    streams: Vec<Stream>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stream.
    #[must_use]
    pub fn with_stream(mut self, stream: Stream) -> Self {
        self.streams.push(stream);
        self
    }

    /// Looks up a stream by name (first match wins).
    #[must_use]
    pub fn stream(&self, name: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.name() == name)
    }

    /// Iterates streams in natural order.
    pub fn streams(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter()
    }
}
